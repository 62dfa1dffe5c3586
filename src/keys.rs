#![forbid(unsafe_code)]

//! RSA key management for the demo session
//!
//! Wraps keypair generation and exposes the public modulus N, the value
//! whose factorization hardness the whole signature scheme rests on.
//! Key sizes are restricted to the sizes the demo can reason about.

use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use thiserror::Error;

/// Key sizes accepted by [`KeyPair::generate`].
pub const SUPPORTED_KEY_BITS: [usize; 4] = [1024, 2048, 3072, 4096];

/// Public exponent used for every generated key.
pub const PUBLIC_EXPONENT: u64 = 65537;

#[derive(Debug, Error)]
pub enum KeyGenerationError {
    #[error("unsupported RSA key size: {0} bits (choose one of 1024, 2048, 3072, 4096)")]
    UnsupportedBits(usize),

    #[error("RSA key generation failed: {0}")]
    Backend(#[from] rsa::Error),
}

/// RSA signing/verification keypair held for the duration of a session.
///
/// The signing key never leaves this struct; callers sign through
/// [`crate::ledger::Ledger::append`] and verify with [`KeyPair::verifying_key`].
pub struct KeyPair {
    signing: RsaPrivateKey,
    verifying: RsaPublicKey,
    bits: usize,
}

impl KeyPair {
    /// Generate a fresh keypair with the given modulus bit length.
    pub fn generate(bits: usize) -> Result<Self, KeyGenerationError> {
        if !SUPPORTED_KEY_BITS.contains(&bits) {
            return Err(KeyGenerationError::UnsupportedBits(bits));
        }
        let mut rng = rand::thread_rng();
        let exponent = BigUint::from(PUBLIC_EXPONENT);
        let signing = RsaPrivateKey::new_with_exp(&mut rng, bits, &exponent)?;
        let verifying = RsaPublicKey::from(&signing);
        Ok(Self {
            signing,
            verifying,
            bits,
        })
    }

    /// Requested key size in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Public modulus N = p * q.
    pub fn modulus(&self) -> &BigUint {
        self.verifying.n()
    }

    /// Actual bit length of the modulus (within one bit of the requested size).
    pub fn modulus_bits(&self) -> usize {
        self.modulus().bits()
    }

    pub fn signing_key(&self) -> &RsaPrivateKey {
        &self.signing
    }

    pub fn verifying_key(&self) -> &RsaPublicKey {
        &self.verifying
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the private half.
        f.debug_struct("KeyPair")
            .field("bits", &self.bits)
            .field("modulus_bits", &self.modulus_bits())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unsupported_bits() {
        for bits in [0, 8, 512, 1536, 8192] {
            match KeyPair::generate(bits) {
                Err(KeyGenerationError::UnsupportedBits(b)) => assert_eq!(b, bits),
                other => panic!("expected UnsupportedBits for {bits}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_supported_sizes_are_sorted_and_unique() {
        let mut sorted = SUPPORTED_KEY_BITS;
        sorted.sort_unstable();
        assert_eq!(sorted, SUPPORTED_KEY_BITS);
        assert_eq!(SUPPORTED_KEY_BITS.len(), 4);
    }
}
