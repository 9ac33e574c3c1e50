//! Error types for the locker constructions.
//!
//! Strongly-typed errors for the two failure domains: construction-time
//! configuration problems and per-call sealing/opening failures. Every
//! opening failure is fail-closed — no variant ever travels alongside
//! partial plaintext.

use thiserror::Error;

/// Errors produced by locker construction and seal/open operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockerError {
    /// Maximum padding length is not a power of two or not representable
    /// in 32 bits. Returned from constructors only; sealed lockers can
    /// never reach this state per call.
    #[error("invalid max padding length {max_padding_length}: must be a power of two below 2^32")]
    Configuration {
        /// The rejected maximum padding length
        max_padding_length: usize,
    },

    /// Ciphertext is shorter than the minimum the wire format requires.
    #[error("invalid ciphertext size: {len} bytes, need at least {min}")]
    InvalidSize {
        /// Actual ciphertext length
        len: usize,
        /// Minimum length for this locker
        min: usize,
    },

    /// AEAD tag verification failed. Covers tampering with the
    /// ciphertext, the nonce prefix, or the associated data.
    #[error("ciphertext authentication failed")]
    AuthenticationFailure,

    /// Padding length exceeds the decrypted buffer. The AEAD tag
    /// verified, so this indicates internal corruption.
    #[error("plaintext is shorter than padding: {len} bytes with padding length {pad_len}")]
    ShortPlaintext {
        /// Recomputed padding length
        pad_len: usize,
        /// Decrypted buffer length
        len: usize,
    },

    /// Signature verification failed after decryption. The decrypted
    /// payload is discarded, never returned.
    #[error("bad signature")]
    BadSignature,

    /// Key material has the wrong length for this locker.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Length this locker requires
        expected: usize,
        /// Length the caller supplied
        actual: usize,
    },

    /// The random source failed while producing key or nonce material.
    /// Propagated to the caller, never retried internally.
    #[error("random source failure: {0}")]
    RandomSource(String),

    /// The locker does not support this operation.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Convert random-source failures at the boundary; internally the typed
/// variant is used everywhere.
impl From<rand::Error> for LockerError {
    fn from(err: rand::Error) -> Self {
        Self::RandomSource(err.to_string())
    }
}
