//! Fuzz target for locker `open` paths
//!
//! Feeds arbitrary key/ciphertext/aad triples through every locker
//! variant's `open` and exercises the padding scheme directly.
//!
//! # Strategy
//!
//! - Arbitrary key material (wrong lengths included)
//! - Arbitrary ciphertexts (truncated, empty, oversized)
//! - Power-of-two padding bounds across the full exponent range
//!
//! # Invariants
//!
//! - `open` never panics, whatever the input
//! - Padding length derivation is deterministic and below its bound
//! - Unpad never reads out of bounds

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use padlock_crypto::{
    AsymmetricLocker, MaxPadding, NoopLocker, Opener, SigncryptLocker, SymmetricLocker, unpad,
};

#[derive(Debug, Arbitrary)]
struct OpenScenario {
    key: Vec<u8>,
    ciphertext: Vec<u8>,
    aad: Vec<u8>,
    max_padding_exponent: u8,
    pad_len: usize,
}

fuzz_target!(|scenario: OpenScenario| {
    let max = 1usize << (scenario.max_padding_exponent % 31);

    let Ok(symmetric) = SymmetricLocker::new(max) else {
        unreachable!("a power of two below 2^31 is a valid padding bound");
    };
    let Ok(asymmetric) = AsymmetricLocker::new(max) else {
        unreachable!("a power of two below 2^31 is a valid padding bound");
    };
    let Ok(signcrypt) = SigncryptLocker::new(max) else {
        unreachable!("a power of two below 2^31 is a valid padding bound");
    };

    // Opening adversarial bytes must fail or succeed cleanly, never panic.
    let _ = symmetric.open(&scenario.key, &scenario.ciphertext, &scenario.aad);
    let _ = asymmetric.open(&scenario.key, &scenario.ciphertext, &scenario.aad);
    let _ = signcrypt.open(&scenario.key, &scenario.ciphertext, &scenario.aad);
    let _ = NoopLocker.open(&scenario.key, &scenario.ciphertext, &scenario.aad);

    // Padding derivation: deterministic, bounded, total.
    let Ok(bound) = MaxPadding::new(max) else {
        unreachable!("a power of two below 2^31 is a valid padding bound");
    };
    if let Ok(key) = <[u8; 32]>::try_from(scenario.key.as_slice()) {
        let first = bound.length(&scenario.ciphertext, &key);
        assert_eq!(first, bound.length(&scenario.ciphertext, &key));
        assert!(first < max);
    }

    // Unpad is total: either the suffix or a typed error.
    if let Ok(suffix) = unpad(&scenario.ciphertext, scenario.pad_len) {
        assert_eq!(suffix.len(), scenario.ciphertext.len() - scenario.pad_len);
    }
});
