//! Contract laws every transform must satisfy: chunking invariance, reset
//! idempotence, clone independence, and argument validation.

use proptest::prelude::*;
use sigil_hashing::{Hash, HashError, Transform, TransformExt};

/// One instance of every shipped transform kind, behind the contract.
fn all_transforms() -> Vec<Box<dyn Transform>> {
    vec![
        Box::new(Hash::sha256()),
        Box::new(Hash::sha3_256()),
        Box::new(Hash::blake2b512()),
        Box::new(Hash::shake128()),
        Box::new(Hash::adler32()),
        Box::new(Hash::crc(sigil_hashing::CrcSpec::CRC32_ISO_HDLC).expect("crc")),
        Box::new(Hash::hmac_sha256(b"contract key").expect("hmac")),
        Box::new(Hash::kmac128(b"contract key", b"").expect("kmac")),
        Box::new(Hash::blake2b_mac(b"contract key", b"", b"").expect("blake2 mac")),
    ]
}

/// Split `data` at the given cut points and feed the pieces in order.
fn feed_partitioned(transform: &mut dyn Transform, data: &[u8], cuts: &[usize]) {
    let mut cuts: Vec<usize> = cuts.iter().map(|&c| c.min(data.len())).collect();
    cuts.sort_unstable();
    let mut start = 0;
    for cut in cuts {
        if cut > start {
            transform.update(&data[start..cut]);
            start = cut;
        }
    }
    transform.update(&data[start..]);
}

proptest! {
    #[test]
    fn chunking_invariance(
        data in prop::collection::vec(any::<u8>(), 0..600),
        cuts in prop::collection::vec(0usize..600, 0..8),
    ) {
        for mut transform in all_transforms() {
            transform.initialize();
            transform.update(&data);
            let whole = transform.finalize().expect("finalize");

            transform.initialize();
            feed_partitioned(transform.as_mut(), &data, &cuts);
            let pieced = transform.finalize().expect("finalize");

            prop_assert_eq!(whole, pieced, "chunking changed {}", transform.name());
        }
    }
}

#[test]
fn every_two_way_split_of_a_short_input() {
    let data: Vec<u8> = (0u8..48).collect();
    let mut adler = Hash::adler32();
    let whole = adler.compute(&data).expect("compute");
    for cut in 0..=data.len() {
        adler.initialize();
        adler.update(&data[..cut]);
        adler.update(&data[cut..]);
        assert_eq!(adler.finalize().expect("finalize"), whole, "split at {cut}");
    }
}

#[test]
fn reset_is_idempotent() {
    for mut transform in all_transforms() {
        transform.initialize();
        let fresh = transform.finalize().expect("finalize");

        // Double initialize, then finalize on empty input.
        transform.initialize();
        transform.initialize();
        let double_init = transform.finalize().expect("finalize");
        // finalize() immediately again: implicit reset puts the instance in
        // the canonical start state.
        let after_finalize = transform.finalize().expect("finalize");

        assert_eq!(fresh, double_init, "{}", transform.name());
        assert_eq!(fresh, after_finalize, "{}", transform.name());
    }
}

#[test]
fn dirty_state_is_discarded_by_initialize() {
    for mut transform in all_transforms() {
        transform.initialize();
        let fresh = transform.finalize().expect("finalize");

        transform.update(b"garbage the caller abandoned");
        transform.initialize();
        assert_eq!(
            transform.finalize().expect("finalize"),
            fresh,
            "{}",
            transform.name()
        );
    }
}

#[test]
fn clones_are_independent() {
    for mut original in all_transforms() {
        original.initialize();
        original.update(b"shared prefix|");

        let mut clone = original.clone_box();

        // Diverge both sides after the clone point.
        clone.update(b"clone-only suffix");
        original.update(b"original suffix");
        let original_result = original.finalize().expect("finalize");
        let clone_result = clone.finalize().expect("finalize");

        // Both finalizes reset; replay each full input on the now-clean
        // instances and check the diverged results were uncontaminated.
        original.update(b"shared prefix|original suffix");
        assert_eq!(
            original.finalize().expect("finalize"),
            original_result,
            "clone mutation leaked into {}",
            original.name()
        );
        clone.update(b"shared prefix|clone-only suffix");
        assert_eq!(
            clone.finalize().expect("finalize"),
            clone_result,
            "original mutation leaked into the clone of {}",
            clone.name()
        );
    }
}

#[test]
fn clone_preserves_configuration() {
    let mut transform = Hash::sha256();
    transform.set_buffer_size(1234).expect("set");
    let clone = transform.clone_box();
    assert_eq!(clone.buffer_size(), 1234);
    assert_eq!(clone.name(), "SHA-256");
}

#[test]
fn update_range_validates_bounds() {
    let data = [1u8, 2, 3, 4];
    let mut transform = Hash::adler32();

    transform.update_range(&data, 1, 3).expect("valid range");
    assert!(matches!(
        transform.update_range(&data, 2, 3),
        Err(HashError::InvalidArgument(_))
    ));
    assert!(matches!(
        transform.update_range(&data, usize::MAX, 2),
        Err(HashError::InvalidArgument(_))
    ));
    // Zero-length slices at the boundary are fine.
    transform.update_range(&data, 4, 0).expect("empty tail");
}

#[test]
fn range_feeding_matches_plain_update() {
    let data: Vec<u8> = (0u8..200).collect();
    let mut whole = Hash::sha256();
    let expected = whole.compute(&data).expect("compute");

    let mut ranged = Hash::sha256();
    ranged.initialize();
    ranged.update_range(&data, 0, 50).expect("range");
    ranged.update_range(&data, 50, 150).expect("range");
    assert_eq!(ranged.finalize().expect("finalize"), expected);
}

#[test]
fn buffer_size_rejects_zero() {
    for mut transform in all_transforms() {
        assert!(matches!(
            transform.set_buffer_size(0),
            Err(HashError::InvalidArgument(_))
        ));
        transform.set_buffer_size(64).expect("set");
        assert_eq!(transform.buffer_size(), 64);
    }
}

#[test]
fn compute_text_encodings_are_distinct() {
    use sigil_hashing::TextEncoding;

    let mut transform = Hash::sha256();
    let utf8 = transform
        .compute_text("données", TextEncoding::Utf8)
        .expect("compute");
    let utf16le = transform
        .compute_text("données", TextEncoding::Utf16Le)
        .expect("compute");
    let utf16be = transform
        .compute_text("données", TextEncoding::Utf16Be)
        .expect("compute");

    assert_ne!(utf8, utf16le);
    assert_ne!(utf16le, utf16be);

    // ASCII-only text distinguishes the UTF-16 byte orders too.
    let ascii_le = transform
        .compute_text("plain", TextEncoding::Utf16Le)
        .expect("compute");
    let ascii_be = transform
        .compute_text("plain", TextEncoding::Utf16Be)
        .expect("compute");
    assert_ne!(ascii_le, ascii_be);
}
