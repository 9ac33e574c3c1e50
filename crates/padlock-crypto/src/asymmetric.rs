//! Asymmetric locker over X25519 key agreement.
//!
//! Derives a shared symmetric key from our scalar and the peer's curve
//! point, then delegates sealing and opening to the symmetric locker.
//! The raw agreement output is hardened with HChaCha20 before use; it is
//! never fed to the AEAD directly.

use chacha20::cipher::consts::U10;
use chacha20::hchacha;
use chacha20poly1305::aead::generic_array::GenericArray;
use rand::{CryptoRng, RngCore};
use x25519_dalek::{X25519_BASEPOINT_BYTES, x25519};
use zeroize::Zeroizing;

use crate::error::LockerError;
use crate::symmetric::{KEY_SIZE, SymmetricLocker};
use crate::traits::{KeyPair, Locker, Opener, Sealer};

/// X25519 scalar and curve-point size in bytes.
pub const SCALAR_SIZE: usize = 32;

/// Size of the packed `private || peer_public` key the seal/open calls
/// expect.
pub const PACKED_KEY_SIZE: usize = 2 * SCALAR_SIZE;

/// Seal/open under an X25519-agreed shared key.
///
/// The `key` argument to [`Sealer::seal`] and [`Opener::open`] packs our
/// private scalar followed by the peer's public point. ECDH symmetry makes
/// `(a_private, b_public)` and `(b_private, a_public)` interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsymmetricLocker {
    inner: SymmetricLocker,
}

impl AsymmetricLocker {
    /// Create a locker with the given maximum padding length.
    ///
    /// # Errors
    ///
    /// `Configuration` unless `max_padding_length` is a power of two
    /// below 2^32.
    pub fn new(max_padding_length: usize) -> Result<Self, LockerError> {
        Ok(Self { inner: SymmetricLocker::new(max_padding_length)? })
    }

    /// Fixed ciphertext overhead: nonce plus authentication tag.
    pub fn overhead(&self) -> usize {
        self.inner.overhead()
    }

    /// Derive the shared symmetric key for a scalar/point pair.
    ///
    /// X25519 scalar multiplication followed by HChaCha20 with an
    /// all-zero input block, so the shared key is uniformly distributed
    /// even though curve points are not.
    pub fn precompute(
        private_key: &[u8; SCALAR_SIZE],
        peer_public_key: &[u8; SCALAR_SIZE],
    ) -> [u8; KEY_SIZE] {
        let shared = Zeroizing::new(x25519(*private_key, *peer_public_key));
        let hardened =
            hchacha::<U10>(GenericArray::from_slice(shared.as_ref()), &GenericArray::default());
        hardened.into()
    }

    /// Unpack `private || peer_public` and derive the shared key.
    fn derive_shared(&self, key: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>, LockerError> {
        if key.len() != PACKED_KEY_SIZE {
            return Err(LockerError::InvalidKeyLength {
                expected: PACKED_KEY_SIZE,
                actual: key.len(),
            });
        }
        let (private, public) = key.split_at(SCALAR_SIZE);
        let Ok(private) = <&[u8; SCALAR_SIZE]>::try_from(private) else {
            unreachable!("split_at yields a 32-byte prefix");
        };
        let Ok(public) = <&[u8; SCALAR_SIZE]>::try_from(public) else {
            unreachable!("split_at yields a 32-byte suffix");
        };
        Ok(Zeroizing::new(Self::precompute(private, public)))
    }
}

impl Sealer for AsymmetricLocker {
    fn seal(&self, key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        let shared = self.derive_shared(key)?;
        self.inner.seal(shared.as_ref(), plaintext, aad)
    }
}

impl Opener for AsymmetricLocker {
    fn open(&self, key: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        let shared = self.derive_shared(key)?;
        self.inner.open(shared.as_ref(), ciphertext, aad)
    }
}

impl Locker for AsymmetricLocker {
    fn generate_key<R>(&self, rng: &mut R) -> Result<KeyPair, LockerError>
    where
        R: RngCore + CryptoRng,
    {
        let mut private = Zeroizing::new([0u8; SCALAR_SIZE]);
        rng.try_fill_bytes(private.as_mut())?;
        let public = x25519(*private, X25519_BASEPOINT_BYTES);
        Ok(KeyPair { public_key: public.to_vec(), private_key: private.to_vec() })
    }
}

/// Pack a private scalar and a peer public point for [`Sealer::seal`] /
/// [`Opener::open`].
pub fn pack_key(private_key: &[u8], peer_public_key: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(private_key.len() + peer_public_key.len());
    packed.extend_from_slice(private_key);
    packed.extend_from_slice(peer_public_key);
    packed
}
