//! Deterministic length-hiding padding.
//!
//! The padding length is a pure function of `(nonce, key)` — never of the
//! plaintext — so the receiver recomputes it locally and nothing secret is
//! transmitted. Keyed BLAKE2b-256 drives the derivation; the first four
//! digest bytes are read big-endian and masked down to `[0, max)`.
//!
//! # Security
//!
//! - Deterministic: same `(nonce, key)` always yields the same length
//! - Plaintext-independent: the length leaks nothing about the payload
//! - Constant-time unpad: the bound check does not branch on its outcome,
//!   so a corrupted padding length cannot be probed through timing

use blake2::Blake2bMac;
use blake2::digest::Mac;
use blake2::digest::consts::U32;
use subtle::ConstantTimeGreater;

use crate::error::LockerError;
use crate::symmetric::KEY_SIZE;

/// Maximum padding length used when none is configured.
pub const DEFAULT_MAX_PADDING_LENGTH: usize = 16;

type PaddingMac = Blake2bMac<U32>;

/// Validated maximum padding length.
///
/// Invariant: the wrapped value is a power of two, greater than zero and
/// representable in 32 bits. Construction is the only place the invariant
/// is checked; every call site may rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPadding(u32);

impl MaxPadding {
    /// Validate and wrap a maximum padding length.
    ///
    /// # Errors
    ///
    /// `Configuration` if `max` is zero, not a power of two, or does not
    /// fit in 32 bits.
    pub fn new(max: usize) -> Result<Self, LockerError> {
        let Ok(max) = u32::try_from(max) else {
            return Err(LockerError::Configuration { max_padding_length: max });
        };
        if !max.is_power_of_two() {
            return Err(LockerError::Configuration { max_padding_length: max as usize });
        }
        Ok(Self(max))
    }

    /// The configured maximum; padding lengths fall in `[0, max)`.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Big-endian encoding bound into the AEAD associated data, so a
    /// tampered padding-length parameter is detected at open time.
    pub fn encoded(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Padding length for this `(nonce, key)` pair.
    ///
    /// Pure and deterministic; the result is always below the configured
    /// maximum.
    pub fn length(self, nonce: &[u8], key: &[u8; KEY_SIZE]) -> usize {
        let Ok(mut mac) = PaddingMac::new_from_slice(key) else {
            unreachable!("32 bytes is a valid BLAKE2b key size");
        };
        mac.update(nonce);
        let digest = mac.finalize().into_bytes();

        let mut word = [0u8; 4];
        word.copy_from_slice(&digest[..4]);
        (u32::from_be_bytes(word) & (self.0 - 1)) as usize
    }
}

impl Default for MaxPadding {
    fn default() -> Self {
        Self(DEFAULT_MAX_PADDING_LENGTH as u32)
    }
}

/// Prepend `pad_len` zero filler bytes to `plaintext`.
///
/// The copy touches every byte of a buffer whose size is fixed by its
/// arguments; there is no branching on the padding value.
pub fn pad(plaintext: &[u8], pad_len: usize) -> Vec<u8> {
    let mut padded = vec![0u8; pad_len + plaintext.len()];
    padded[pad_len..].copy_from_slice(plaintext);
    padded
}

/// Strip the first `pad_len` bytes of a padded plaintext.
///
/// # Errors
///
/// `ShortPlaintext` if the buffer is shorter than the padding length. The
/// comparison runs in constant time.
pub fn unpad(padded: &[u8], pad_len: usize) -> Result<&[u8], LockerError> {
    let too_short = (pad_len as u64).ct_gt(&(padded.len() as u64));
    if bool::from(too_short) {
        return Err(LockerError::ShortPlaintext { pad_len, len: padded.len() });
    }
    Ok(&padded[pad_len..])
}
