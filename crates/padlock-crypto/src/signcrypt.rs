//! Signcrypting locker: Ed25519 sign-then-encrypt with length hiding.
//!
//! Seal signs the plaintext, derives a per-message symmetric key from the
//! signer's public key and a fresh nonce, then pads and AEAD-seals
//! `signature || plaintext`. Open reverses the derivation and verifies the
//! signature after decryption; verification is terminal and gates every
//! byte of released plaintext.
//!
//! Signing before encryption hides the signature from passive observers,
//! and padding the combined block hides the true plaintext length
//! independent of the fixed signature size.
//!
//! # Security
//!
//! The per-message key is derived from *public* values only: the signer's
//! public key and the transmitted nonce. Anyone holding the public key can
//! therefore decrypt. This construction binds authorship and hides length;
//! it does not provide confidentiality against public-key holders.

use blake2::Blake2bMac;
use blake2::digest::Mac;
use blake2::digest::consts::U32;
use ed25519_dalek::{
    KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH, Signature, Signer,
    SigningKey, Verifier, VerifyingKey,
};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::LockerError;
use crate::padding::MaxPadding;
use crate::symmetric::{KEY_SIZE, NONCE_SIZE, TAG_SIZE, open_padded, seal_padded};
use crate::traits::{KeyPair, Locker, Opener, Sealer};

/// Ed25519 signature size in bytes.
pub const SIGNATURE_SIZE: usize = SIGNATURE_LENGTH;

/// Personalization string for the per-message key derivation.
const KEY_PERSONA: &[u8] = b"scamblesigned";

/// Sign-then-encrypt seal/open bound to an Ed25519 identity.
///
/// [`Sealer::seal`] takes the 64-byte `seed || public` private key
/// encoding; [`Opener::open`] takes the 32-byte public key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SigncryptLocker {
    max_padding: MaxPadding,
}

impl SigncryptLocker {
    /// Create a locker with the given maximum padding length.
    ///
    /// # Errors
    ///
    /// `Configuration` unless `max_padding_length` is a power of two
    /// below 2^32.
    pub fn new(max_padding_length: usize) -> Result<Self, LockerError> {
        Ok(Self { max_padding: MaxPadding::new(max_padding_length)? })
    }

    /// Fixed ciphertext overhead: nonce, authentication tag, and the
    /// enclosed signature.
    pub fn overhead(&self) -> usize {
        NONCE_SIZE + TAG_SIZE + SIGNATURE_SIZE
    }

    /// The padding bound sealed into every ciphertext.
    pub fn max_padding(&self) -> MaxPadding {
        self.max_padding
    }
}

/// Derive the per-message symmetric key from the signer's public key and
/// the nonce: BLAKE2b-MAC keyed by the public key, salted by the nonce,
/// personalized with a fixed domain string. Both sides compute this from
/// values present on the wire or known in advance.
fn derive_message_key(
    public_key: &[u8; PUBLIC_KEY_LENGTH],
    nonce: &[u8; NONCE_SIZE],
) -> Zeroizing<[u8; KEY_SIZE]> {
    let Ok(mac) = Blake2bMac::<U32>::new_with_salt_and_personal(public_key, nonce, KEY_PERSONA)
    else {
        unreachable!("key, salt and persona sizes are within BLAKE2b limits");
    };
    let digest = mac.finalize().into_bytes();

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    key.copy_from_slice(&digest);
    key
}

impl Sealer for SigncryptLocker {
    fn seal(&self, key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        if key.len() != KEYPAIR_LENGTH {
            return Err(LockerError::InvalidKeyLength {
                expected: KEYPAIR_LENGTH,
                actual: key.len(),
            });
        }
        let Ok(seed) = <&[u8; SECRET_KEY_LENGTH]>::try_from(&key[..SECRET_KEY_LENGTH]) else {
            unreachable!("length checked above");
        };
        let signing_key = SigningKey::from_bytes(seed);
        let public_key = signing_key.verifying_key().to_bytes();

        let signature = signing_key.sign(plaintext);

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.try_fill_bytes(&mut nonce)?;
        let message_key = derive_message_key(&public_key, &nonce);

        let mut signed = Vec::with_capacity(SIGNATURE_SIZE + plaintext.len());
        signed.extend_from_slice(&signature.to_bytes());
        signed.extend_from_slice(plaintext);

        seal_padded(self.max_padding, &message_key, &nonce, &signed, aad)
    }
}

impl Opener for SigncryptLocker {
    fn open(&self, key: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>, LockerError> {
        let public_key: &[u8; PUBLIC_KEY_LENGTH] = key.try_into().map_err(|_| {
            LockerError::InvalidKeyLength { expected: PUBLIC_KEY_LENGTH, actual: key.len() }
        })?;
        if ciphertext.len() < self.overhead() {
            return Err(LockerError::InvalidSize {
                len: ciphertext.len(),
                min: self.overhead(),
            });
        }
        let Ok(nonce) = <&[u8; NONCE_SIZE]>::try_from(&ciphertext[..NONCE_SIZE]) else {
            unreachable!("length checked above");
        };

        let message_key = derive_message_key(public_key, nonce);
        let signed = open_padded(self.max_padding, &message_key, ciphertext, aad)?;

        // The AEAD key is publicly derivable, so an authenticated-but-forged
        // message may still unpad to fewer bytes than a signature.
        if signed.len() < SIGNATURE_SIZE {
            return Err(LockerError::BadSignature);
        }
        let (signature, payload) = signed.split_at(SIGNATURE_SIZE);
        let Ok(signature) = <&[u8; SIGNATURE_SIZE]>::try_from(signature) else {
            unreachable!("split at SIGNATURE_SIZE");
        };
        let signature = Signature::from_bytes(signature);

        let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
            return Err(LockerError::BadSignature);
        };
        verifying_key.verify(payload, &signature).map_err(|_| LockerError::BadSignature)?;

        Ok(payload.to_vec())
    }
}

impl Locker for SigncryptLocker {
    fn generate_key<R>(&self, rng: &mut R) -> Result<KeyPair, LockerError>
    where
        R: RngCore + CryptoRng,
    {
        let mut seed = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        rng.try_fill_bytes(seed.as_mut())?;
        let signing_key = SigningKey::from_bytes(&seed);

        Ok(KeyPair {
            public_key: signing_key.verifying_key().to_bytes().to_vec(),
            private_key: signing_key.to_keypair_bytes().to_vec(),
        })
    }
}
