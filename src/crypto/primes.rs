//! Trial-division primality
//!
//! Nothing fancy: every candidate factor up to the square root gets tried.
//! Fine for the demo ranges here; don't hunt large primes with it.

/// Trial-division primality test.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut factor = 3u64;
    while factor.saturating_mul(factor) <= n {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// All primes strictly below `limit`, in order.
pub fn primes_below(limit: u64) -> impl Iterator<Item = u64> {
    (2..limit).filter(|&n| is_prime(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        let first: Vec<u64> = primes_below(30).collect();
        assert_eq!(first, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn small_composites() {
        for n in [0u64, 1, 4, 9, 15, 21, 25, 27, 33, 1000] {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }

    #[test]
    fn rsa_demo_primes() {
        // The p and q values from the RSA demo data.
        for n in [5u64, 11, 61, 53, 113, 170_497, 170_503] {
            assert!(is_prime(n), "{n} should be prime");
        }
    }

    #[test]
    fn square_of_prime_is_composite() {
        assert!(!is_prime(170_497 * 170_497));
    }
}
