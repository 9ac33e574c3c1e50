//! Padlock Lockers
//!
//! Length-hiding authenticated-encryption "lockers": reusable seal/open
//! constructions over opaque byte payloads. Three variants share one
//! canonical contract and one wire format:
//!
//! - [`SymmetricLocker`]: AEAD under a raw 32-byte key
//! - [`AsymmetricLocker`]: X25519 agreement, then the symmetric flow
//! - [`SigncryptLocker`]: Ed25519 sign-then-encrypt with a per-message
//!   key bound to the signer's public identity
//!
//! # Control Flow
//!
//! Every seal and open follows the same shape:
//!
//! ```text
//! Seal:  pad(plaintext)              Open:  split nonce
//!           │                                  │
//!           ▼                                  ▼
//!        AEAD-seal(padded, aad)             AEAD-open (fails closed)
//!           │                                  │
//!           ▼                                  ▼
//!        nonce ‖ sealed                     unpad (recomputed locally)
//!                                              │
//!                                              ▼
//!                                           verify signature (signcrypt)
//! ```
//!
//! Wire format: `nonce ‖ encrypted_payload ‖ tag`, nothing else. The AEAD
//! associated data is always `BE32(max_padding) ‖ caller_aad`.
//!
//! # Security
//!
//! Length Hiding:
//! - Padding length is a keyed, deterministic function of `(nonce, key)`,
//!   never of the plaintext, so receivers recompute it locally
//! - The signcrypt variant pads `signature ‖ plaintext` as one block
//!
//! Tamper Evidence:
//! - Poly1305 tag covers payload, nonce, padding bound, and caller aad
//! - Failed authentication or signature verification releases zero
//!   plaintext bytes
//!
//! Configuration:
//! - Lockers are immutable after construction and safe to share across
//!   threads; invalid padding bounds are rejected at construction, never
//!   at call time

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod asymmetric;
pub mod error;
pub mod noop;
pub mod padding;
pub mod signcrypt;
pub mod symmetric;
pub mod traits;

pub use asymmetric::{AsymmetricLocker, PACKED_KEY_SIZE, SCALAR_SIZE, pack_key};
pub use error::LockerError;
pub use noop::NoopLocker;
pub use padding::{DEFAULT_MAX_PADDING_LENGTH, MaxPadding, pad, unpad};
pub use signcrypt::{SIGNATURE_SIZE, SigncryptLocker};
pub use symmetric::{KEY_SIZE, NONCE_SIZE, SymmetricLocker, TAG_SIZE};
pub use traits::{KeyPair, Locker, Opener, SealOpener, Sealer};
