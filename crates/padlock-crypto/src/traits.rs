//! Capability traits shared by every locker variant.
//!
//! All lockers speak one canonical contract: `seal(key, plaintext, aad)`
//! and `open(key, ciphertext, aad)`. The split into [`Sealer`] and
//! [`Opener`] lets call sites demand exactly the capability they use.

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::LockerError;

/// Key material produced by [`Locker::generate_key`].
///
/// Both halves are zeroized on drop. For symmetric lockers the halves are
/// identical; for agreement and signcryption lockers the private half is
/// the scalar/seed encoding the locker's `seal` expects.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    /// Public half, safe to share with peers.
    pub public_key: Vec<u8>,
    /// Private half, owned exclusively by the caller.
    pub private_key: Vec<u8>,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Seals plaintext under a key.
pub trait Sealer {
    /// Encrypt and authenticate `plaintext` under `key`, binding `aad`
    /// into the authentication tag.
    ///
    /// # Errors
    ///
    /// `InvalidKeyLength` for malformed key material, `RandomSource` if
    /// nonce generation fails.
    fn seal(&self, key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError>;
}

/// Opens ciphertext under a key.
pub trait Opener {
    /// Authenticate and decrypt `ciphertext` under `key` and `aad`.
    ///
    /// Fails closed: any error means zero plaintext bytes are released.
    ///
    /// # Errors
    ///
    /// `InvalidSize` for truncated input, `AuthenticationFailure` on tag
    /// mismatch, `ShortPlaintext` on padding corruption, `BadSignature`
    /// for signcrypting lockers.
    fn open(&self, key: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError>;
}

/// A thing that both seals and opens.
pub trait SealOpener: Sealer + Opener {}

impl<T: Sealer + Opener> SealOpener for T {}

/// A full locker: seal/open plus key generation.
pub trait Locker: SealOpener {
    /// Generate a keypair from the caller's random source.
    ///
    /// # Errors
    ///
    /// `RandomSource` if the source fails; the read is never retried.
    fn generate_key<R>(&self, rng: &mut R) -> Result<KeyPair, LockerError>
    where
        R: RngCore + CryptoRng;
}
