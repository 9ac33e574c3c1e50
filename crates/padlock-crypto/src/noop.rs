//! Pass-through locker with no cryptography at all.
//!
//! Useful as a stand-in wherever a [`SealOpener`](crate::SealOpener) is
//! required but plaintext handling is acceptable, e.g. in tests or
//! plumbing that toggles encryption.

use rand::{CryptoRng, RngCore};

use crate::error::LockerError;
use crate::traits::{KeyPair, Locker, Opener, Sealer};

/// Locker whose seal and open return the input unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLocker;

impl Sealer for NoopLocker {
    fn seal(&self, _key: &[u8], plaintext: &[u8], _aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        Ok(plaintext.to_vec())
    }
}

impl Opener for NoopLocker {
    fn open(&self, _key: &[u8], ciphertext: &[u8], _aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        Ok(ciphertext.to_vec())
    }
}

impl Locker for NoopLocker {
    fn generate_key<R>(&self, _rng: &mut R) -> Result<KeyPair, LockerError>
    where
        R: RngCore + CryptoRng,
    {
        Err(LockerError::Unsupported("noop locker has no keys"))
    }
}
