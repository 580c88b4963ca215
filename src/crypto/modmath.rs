//! Modular arithmetic over machine words
//!
//! All intermediates go through `u128`, so products of two `u64` values
//! never overflow.

/// `base ^ exp (mod modulus)` by square-and-multiply.
///
/// Panics if `modulus` is zero.
pub fn mod_exp(base: u64, mut exp: u64, modulus: u64) -> u64 {
    assert!(modulus != 0, "modulus must be nonzero");
    if modulus == 1 {
        return 0;
    }

    let modulus = modulus as u128;
    let mut base = base as u128 % modulus;
    let mut result: u128 = 1;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }

    result as u64
}

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Multiplicative inverse of `a` modulo `m`, if one exists.
///
/// Extended Euclidean algorithm with the coefficient kept non-negative by
/// reducing modulo `m` at each step.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m == 0 || gcd(a, m) != 1 {
        return None;
    }
    if m == 1 {
        return Some(0);
    }

    let m_i = m as i128;
    let (mut old_r, mut r) = (a as i128 % m_i, m_i);
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    // old_r == gcd == 1 here; bring the coefficient into 0..m.
    let inv = old_s.rem_euclid(m_i);
    Some(inv as u64)
}
