//! Symmetric length-hiding locker over ChaCha20-Poly1305.
//!
//! Seal: fresh random nonce, deterministic padding from `(nonce, key)`,
//! AEAD over the padded payload, nonce prepended to the output. Open runs
//! the same derivations in reverse and fails closed on any mismatch.
//!
//! The associated data always binds `BE32(max_padding)` ahead of the
//! caller's bytes, so the padding-length parameter itself is
//! tamper-evident.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::LockerError;
use crate::padding::{self, MaxPadding};
use crate::traits::{KeyPair, Locker, Opener, Sealer};

/// ChaCha20-Poly1305 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// IETF ChaCha20-Poly1305 nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Symmetric seal/open with deterministic length-hiding padding.
///
/// Immutable after construction; concurrent use from multiple threads is
/// safe without locking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymmetricLocker {
    max_padding: MaxPadding,
}

impl SymmetricLocker {
    /// Create a locker with the given maximum padding length.
    ///
    /// # Errors
    ///
    /// `Configuration` unless `max_padding_length` is a power of two
    /// below 2^32.
    pub fn new(max_padding_length: usize) -> Result<Self, LockerError> {
        Ok(Self { max_padding: MaxPadding::new(max_padding_length)? })
    }

    /// Fixed ciphertext overhead: nonce plus authentication tag.
    /// Informational; it is never transmitted.
    pub fn overhead(&self) -> usize {
        NONCE_SIZE + TAG_SIZE
    }

    /// The padding bound sealed into every ciphertext.
    pub fn max_padding(&self) -> MaxPadding {
        self.max_padding
    }
}

impl Sealer for SymmetricLocker {
    fn seal(&self, key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        let key = aead_key(key)?;
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.try_fill_bytes(&mut nonce)?;
        seal_padded(self.max_padding, &key, &nonce, plaintext, aad)
    }
}

impl Opener for SymmetricLocker {
    fn open(&self, key: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        let key = aead_key(key)?;
        open_padded(self.max_padding, &key, ciphertext, aad)
    }
}

impl Locker for SymmetricLocker {
    fn generate_key<R>(&self, rng: &mut R) -> Result<KeyPair, LockerError>
    where
        R: RngCore + CryptoRng,
    {
        let mut key = vec![0u8; KEY_SIZE];
        rng.try_fill_bytes(&mut key)?;
        Ok(KeyPair { public_key: key.clone(), private_key: key })
    }
}

/// Coerce caller key material to the AEAD key size.
fn aead_key(key: &[u8]) -> Result<[u8; KEY_SIZE], LockerError> {
    key.try_into()
        .map_err(|_| LockerError::InvalidKeyLength { expected: KEY_SIZE, actual: key.len() })
}

/// Associated data: `BE32(max_padding)` followed by the caller's bytes.
pub(crate) fn associated_data(max_padding: MaxPadding, aad: &[u8]) -> Vec<u8> {
    let mut bound = Vec::with_capacity(4 + aad.len());
    bound.extend_from_slice(&max_padding.encoded());
    bound.extend_from_slice(aad);
    bound
}

/// Pad and AEAD-seal `plaintext`, returning `nonce || ciphertext || tag`.
///
/// Shared by the symmetric and signcrypting lockers; the caller supplies
/// the nonce so derived-key flows can reuse it for key derivation.
pub(crate) fn seal_padded(
    max_padding: MaxPadding,
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, LockerError> {
    let cipher = ChaCha20Poly1305::new(key.into());
    let pad_len = max_padding.length(nonce, key);
    let padded = padding::pad(plaintext, pad_len);
    let bound = associated_data(max_padding, aad);

    let Ok(sealed) = cipher
        .encrypt(Nonce::from_slice(nonce), Payload { msg: &padded, aad: &bound })
    else {
        unreachable!("ChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Split the nonce, AEAD-open the remainder, and strip the deterministic
/// padding derived from `(nonce, key)`. Fails closed on any tag mismatch.
///
/// Unpadding lives here rather than in the callers so no seal/open flow
/// can release a still-padded payload.
pub(crate) fn open_padded(
    max_padding: MaxPadding,
    key: &[u8; KEY_SIZE],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, LockerError> {
    if ciphertext.len() < NONCE_SIZE {
        return Err(LockerError::InvalidSize { len: ciphertext.len(), min: NONCE_SIZE });
    }
    let (nonce, sealed) = ciphertext.split_at(NONCE_SIZE);
    let cipher = ChaCha20Poly1305::new(key.into());
    let bound = associated_data(max_padding, aad);

    let padded = cipher
        .decrypt(Nonce::from_slice(nonce), Payload { msg: sealed, aad: &bound })
        .map_err(|_| LockerError::AuthenticationFailure)?;

    let pad_len = max_padding.length(nonce, key);
    Ok(padding::unpad(&padded, pad_len)?.to_vec())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const ZERO_KEY: [u8; KEY_SIZE] = [0u8; KEY_SIZE];

    #[test]
    fn seal_open_round_trip() {
        let locker = SymmetricLocker::default();
        let ciphertext = locker.seal(&ZERO_KEY, b"hello", b"").unwrap();
        assert_eq!(locker.open(&ZERO_KEY, &ciphertext, b"").unwrap(), b"hello");
    }

    #[test]
    fn ciphertext_length_accounts_for_padding() {
        let locker = SymmetricLocker::default();
        let ciphertext = locker.seal(&ZERO_KEY, b"hello", b"").unwrap();

        let nonce = &ciphertext[..NONCE_SIZE];
        let pad_len = locker.max_padding().length(nonce, &ZERO_KEY);
        assert_eq!(ciphertext.len(), NONCE_SIZE + pad_len + 5 + TAG_SIZE);
    }

    #[test]
    fn round_trip_with_aad() {
        let locker = SymmetricLocker::default();
        let ciphertext = locker.seal(&ZERO_KEY, b"payload", b"context").unwrap();
        assert_eq!(locker.open(&ZERO_KEY, &ciphertext, b"context").unwrap(), b"payload");
    }

    #[test]
    fn round_trip_empty_plaintext() {
        let locker = SymmetricLocker::default();
        let ciphertext = locker.seal(&ZERO_KEY, b"", b"").unwrap();
        assert_eq!(locker.open(&ZERO_KEY, &ciphertext, b"").unwrap(), b"");
    }

    #[test]
    fn mismatched_aad_fails_closed() {
        let locker = SymmetricLocker::default();
        let ciphertext = locker.seal(&ZERO_KEY, b"payload", b"context").unwrap();

        let result = locker.open(&ZERO_KEY, &ciphertext, b"other");
        assert_eq!(result, Err(LockerError::AuthenticationFailure));
    }

    #[test]
    fn wrong_key_fails_closed() {
        let locker = SymmetricLocker::default();
        let ciphertext = locker.seal(&ZERO_KEY, b"payload", b"").unwrap();

        let wrong_key = [1u8; KEY_SIZE];
        assert_eq!(
            locker.open(&wrong_key, &ciphertext, b""),
            Err(LockerError::AuthenticationFailure)
        );
    }

    #[test]
    fn every_bit_flip_fails_closed() {
        let locker = SymmetricLocker::default();
        let ciphertext = locker.seal(&ZERO_KEY, b"bits", b"").unwrap();

        for index in 0..ciphertext.len() {
            for bit in 0..8 {
                let mut tampered = ciphertext.clone();
                tampered[index] ^= 1 << bit;
                assert_eq!(
                    locker.open(&ZERO_KEY, &tampered, b""),
                    Err(LockerError::AuthenticationFailure),
                    "flip at byte {index} bit {bit} must fail"
                );
            }
        }
    }

    #[test]
    fn truncated_ciphertext_is_invalid_size() {
        let locker = SymmetricLocker::default();
        let result = locker.open(&ZERO_KEY, &[0u8; NONCE_SIZE - 1], b"");
        assert_eq!(
            result,
            Err(LockerError::InvalidSize { len: NONCE_SIZE - 1, min: NONCE_SIZE })
        );
    }

    #[test]
    fn malformed_key_is_rejected() {
        let locker = SymmetricLocker::default();
        let result = locker.seal(&[0u8; 16], b"payload", b"");
        assert_eq!(result, Err(LockerError::InvalidKeyLength { expected: KEY_SIZE, actual: 16 }));
    }

    #[test]
    fn seals_are_randomized() {
        let locker = SymmetricLocker::default();
        let first = locker.seal(&ZERO_KEY, b"same input", b"").unwrap();
        let second = locker.seal(&ZERO_KEY, b"same input", b"").unwrap();
        assert_ne!(first, second, "fresh nonces must randomize ciphertexts");
    }

    #[test]
    fn different_max_padding_fails_cross_open() {
        let sealer = SymmetricLocker::new(16).unwrap();
        let opener = SymmetricLocker::new(32).unwrap();

        let ciphertext = sealer.seal(&ZERO_KEY, b"payload", b"").unwrap();
        assert_eq!(
            opener.open(&ZERO_KEY, &ciphertext, b""),
            Err(LockerError::AuthenticationFailure),
            "BE32(max_padding) is bound into the tag"
        );
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(SymmetricLocker::new(15).is_err());
        assert!(SymmetricLocker::new(0).is_err());
    }

    #[test]
    fn generated_key_halves_are_identical() {
        let locker = SymmetricLocker::default();
        let mut rng = StdRng::seed_from_u64(7);

        let pair = locker.generate_key(&mut rng).unwrap();
        assert_eq!(pair.public_key, pair.private_key);
        assert_eq!(pair.private_key.len(), KEY_SIZE);
    }

    #[test]
    fn generated_key_round_trips() {
        let locker = SymmetricLocker::default();
        let mut rng = StdRng::seed_from_u64(11);

        let pair = locker.generate_key(&mut rng).unwrap();
        let ciphertext = locker.seal(&pair.private_key, b"payload", b"aad").unwrap();
        assert_eq!(locker.open(&pair.public_key, &ciphertext, b"aad").unwrap(), b"payload");
    }

    #[test]
    fn overhead_is_nonce_plus_tag() {
        assert_eq!(SymmetricLocker::default().overhead(), 28);
    }
}
