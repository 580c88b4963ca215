//! RSA key derivation
//!
//! Given two primes and a public exponent, derive the private exponent via
//! the extended Euclidean algorithm and verify `(e * d) mod phi == 1`.

use crate::crypto::modmath::{gcd, mod_exp, mod_inverse};
use crate::error::{Error, Result};

/// A derived key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaKeyPair {
    /// Public modulus `p * q`
    pub n: u64,
    /// Public exponent
    pub e: u64,
    /// Private exponent
    pub d: u64,
}

impl RsaKeyPair {
    /// Derive a key pair from primes `p`, `q` and public exponent `e`.
    pub fn derive(p: u64, q: u64, e: u64) -> Result<Self> {
        let phi = (p - 1) * (q - 1);

        if gcd(e, phi) != 1 {
            return Err(Error::NotCoprime { e, phi });
        }

        // gcd == 1 guarantees the inverse exists.
        let d = mod_inverse(e, phi).ok_or(Error::NotCoprime { e, phi })?;

        debug_assert_eq!((e as u128 * d as u128 % phi as u128) as u64, 1);

        Ok(RsaKeyPair { n: p * q, e, d })
    }

    /// Encrypt one value smaller than `n`.
    pub fn encrypt(&self, m: u64) -> u64 {
        mod_exp(m, self.e, self.n)
    }

    /// Decrypt one value.
    pub fn decrypt(&self, c: u64) -> u64 {
        mod_exp(c, self.d, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // p, q, e, expected d
    const VECTORS: [(u64, u64, u64, u64); 5] = [
        (5, 11, 7, 23),
        (61, 53, 17, 2_753),
        (113, 91, 17, 593),
        (170_497, 170_503, 5, 11_627_963_597),
        (170_497, 170_503, 11, 18_499_032_995),
    ];

    #[test]
    fn known_key_pairs_derive() {
        for (p, q, e, d) in VECTORS {
            let key = RsaKeyPair::derive(p, q, e).unwrap();
            assert_eq!(key.d, d, "d for p={p} q={q} e={e}");
            assert_eq!(key.n, p * q);
        }
    }

    #[test]
    fn shared_factor_is_rejected() {
        // phi(5, 11) = 40; e = 5 shares the factor 5.
        let err = RsaKeyPair::derive(5, 11, 5).unwrap_err();
        assert!(matches!(err, Error::NotCoprime { .. }));
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = RsaKeyPair::derive(61, 53, 17).unwrap();
        for m in [0u64, 1, 42, 65, 1234, 3000] {
            assert_eq!(key.decrypt(key.encrypt(m)), m);
        }
    }
}
