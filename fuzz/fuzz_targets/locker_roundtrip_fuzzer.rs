//! Fuzz target for seal/open round trips
//!
//! Seals arbitrary plaintexts under arbitrary symmetric keys, then checks
//! the round trip and single-byte corruption behavior.
//!
//! # Invariants
//!
//! - `open(k, seal(k, m, a), a) == m`
//! - Corrupting any ciphertext byte makes `open` fail
//! - Ciphertext length is `nonce + pad_len + plaintext + tag`

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use padlock_crypto::{NONCE_SIZE, Opener, Sealer, SymmetricLocker, TAG_SIZE};

#[derive(Debug, Arbitrary)]
struct RoundTripScenario {
    key: [u8; 32],
    plaintext: Vec<u8>,
    aad: Vec<u8>,
    corrupt_index: usize,
    corrupt_mask: u8,
}

fuzz_target!(|scenario: RoundTripScenario| {
    let locker = SymmetricLocker::default();

    let Ok(ciphertext) = locker.seal(&scenario.key, &scenario.plaintext, &scenario.aad) else {
        unreachable!("sealing under a 32-byte key cannot fail");
    };

    let pad_len = locker.max_padding().length(&ciphertext[..NONCE_SIZE], &scenario.key);
    assert_eq!(
        ciphertext.len(),
        NONCE_SIZE + pad_len + scenario.plaintext.len() + TAG_SIZE,
        "wire format is nonce || padded payload || tag"
    );

    let Ok(opened) = locker.open(&scenario.key, &ciphertext, &scenario.aad) else {
        unreachable!("opening an untampered seal cannot fail");
    };
    assert_eq!(opened, scenario.plaintext);

    if scenario.corrupt_mask != 0 {
        let mut tampered = ciphertext.clone();
        let index = scenario.corrupt_index % tampered.len();
        tampered[index] ^= scenario.corrupt_mask;
        assert!(
            locker.open(&scenario.key, &tampered, &scenario.aad).is_err(),
            "corruption at byte {index} must fail closed"
        );
    }
});
