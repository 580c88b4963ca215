//! Toy cryptography demos and their self-test driver
//!
//! Demo-grade implementations over machine words; not a cryptosystem.

pub mod dh;
pub mod modmath;
pub mod primes;
pub mod rsa;

use crate::error::{Error, Result};

/// Names of the self-test suites, in run order.
pub const SUITES: [&str; 4] = ["primes", "generator", "diffie-hellman", "rsa"];

fn prime_suite() -> Result<()> {
    let expected = [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29];
    let found: Vec<u64> = primes::primes_below(30).collect();
    if found != expected {
        return Err(Error::SelfTest {
            name: "primes",
            detail: format!("primes below 30 came out as {found:?}"),
        });
    }
    for p in [170_497u64, 170_503] {
        if !primes::is_prime(p) {
            return Err(Error::SelfTest {
                name: "primes",
                detail: format!("{p} not recognized as prime"),
            });
        }
    }
    Ok(())
}

fn generator_suite() -> Result<()> {
    dh::check_generator(dh::DhParams {
        modulus: 19,
        generator: 3,
    })?;

    // The short-cycle pair must be rejected.
    let short = dh::DhParams {
        modulus: 10,
        generator: 2,
    };
    match dh::check_generator(short) {
        Err(Error::BadGenerator { .. }) => Ok(()),
        _ => Err(Error::SelfTest {
            name: "generator",
            detail: "generator 2 mod 10 was not rejected".into(),
        }),
    }
}

fn dh_suite() -> Result<()> {
    let secret = dh::exchange_over_tcp(dh::DhParams::demo(), 5, 3)?;
    let expected = modmath::mod_exp(3, 15, 17);
    if secret != expected {
        return Err(Error::SelfTest {
            name: "diffie-hellman",
            detail: format!("secret {secret}, expected {expected}"),
        });
    }
    Ok(())
}

fn rsa_suite() -> Result<()> {
    let vectors = [
        (5u64, 11u64, 7u64, 23u64),
        (61, 53, 17, 2_753),
        (113, 91, 17, 593),
        (170_497, 170_503, 5, 11_627_963_597),
        (170_497, 170_503, 11, 18_499_032_995),
    ];
    for (p, q, e, d) in vectors {
        let key = rsa::RsaKeyPair::derive(p, q, e)?;
        if key.d != d {
            return Err(Error::SelfTest {
                name: "rsa",
                detail: format!("p={p} q={q} e={e}: derived d={}, expected {d}", key.d),
            });
        }
    }
    Ok(())
}

/// Run every suite in order, reporting each name before it starts.
///
/// Stops at the first failure.
pub fn run_self_tests<F>(mut report: F) -> Result<()>
where
    F: FnMut(&str),
{
    let suites: [(&str, fn() -> Result<()>); 4] = [
        ("primes", prime_suite),
        ("generator", generator_suite),
        ("diffie-hellman", dh_suite),
        ("rsa", rsa_suite),
    ];

    for (name, suite) in suites {
        report(name);
        suite()?;
    }
    Ok(())
}
