//! KMAC against the NIST SP 800-185 sample vectors, plus the double-finalize
//! guard and clone semantics around drain position.

use hex_literal::hex;
use sigil_hashing::{Hash, HashError, Transform, TransformExt, XofTransform};

/// The sample key used throughout the NIST examples: 0x40..0x5F.
fn nist_key() -> Vec<u8> {
    (0x40u8..=0x5F).collect()
}

#[test]
fn nist_kmac128_sample_1() {
    let mut mac = Hash::kmac128(&nist_key(), b"").expect("kmac");
    let result = mac.compute(&[0x00, 0x01, 0x02, 0x03]).expect("compute");
    assert_eq!(
        result.as_bytes(),
        hex!("e5780b0d3ea6f7d3a429c5706aa43a00fadbd7d49628839e3187243f456ee14e")
    );
}

#[test]
fn nist_kmac128_sample_2_with_customization() {
    let mut mac = Hash::kmac128(&nist_key(), b"My Tagged Application").expect("kmac");
    let result = mac.compute(&[0x00, 0x01, 0x02, 0x03]).expect("compute");
    assert_eq!(
        result.as_bytes(),
        hex!("3b1fba963cd8b0b59e8c1a6d71888b7143651af8ba0a7070c0979e2811324aa5")
    );
}

#[test]
fn nist_kmac128_sample_3_long_message() {
    let data: Vec<u8> = (0u8..=0xC7).collect();
    let mut mac = Hash::kmac128(&nist_key(), b"My Tagged Application").expect("kmac");
    let result = mac.compute(&data).expect("compute");
    assert_eq!(
        result.as_bytes(),
        hex!("1f5b4e6cca02209e0dcb5ca635b89a15e271ecc760071dfd805faa38f9729230")
    );
}

#[test]
fn nist_kmac256_sample_with_customization() {
    let mut mac = Hash::kmac256(&nist_key(), b"My Tagged Application").expect("kmac");
    let result = mac.compute(&[0x00, 0x01, 0x02, 0x03]).expect("compute");
    assert_eq!(
        result.as_bytes(),
        hex!(
            "20c570c31346f703c9ac36c61c03cb64c3970d0cfc787e9b79599d273a68d2f7"
            "f69d4cc3de9d104a351689f27cf6f5951f0103f33f4f24871024d9c27773a8dd"
        )
    );
}

#[test]
fn double_finalize_guard_suffix_appended_once() {
    let mut split = Hash::kmacxof256(b"guard key", b"").expect("kmac");
    split.update(b"two drains");
    let mut first = [0u8; 16];
    let mut second = [0u8; 16];
    split.read(&mut first).expect("read");
    split.read(&mut second).expect("read");

    let mut whole = Hash::kmacxof256(b"guard key", b"").expect("kmac");
    whole.update(b"two drains");
    let mut both = [0u8; 32];
    whole.read(&mut both).expect("read");

    assert_eq!(&both[..16], first, "second drain re-appended the suffix");
    assert_eq!(&both[16..], second);
}

#[test]
fn fixed_and_xof_variants_domain_separate() {
    // Fixed KMAC right-encodes its length, KMACXOF right-encodes zero, so
    // the same key and message must produce unrelated output.
    let mut fixed = Hash::kmac128(b"key", b"").expect("kmac");
    let fixed_out = fixed.compute(b"message").expect("compute");

    let mut xof = Hash::kmacxof128(b"key", b"").expect("kmac");
    xof.update(b"message");
    let mut xof_out = [0u8; 32];
    xof.read(&mut xof_out).expect("read");

    assert_ne!(fixed_out.as_bytes(), xof_out);
}

#[test]
fn clone_preserves_drain_position_then_diverges_independently() {
    let mut original = Hash::kmacxof128(b"clone key", b"").expect("kmac");
    original.update(b"payload");
    let mut head = [0u8; 8];
    original.read(&mut head).expect("read");

    let mut clone = original.clone_xof();

    let mut original_tail = [0u8; 8];
    let mut clone_tail = [0u8; 8];
    original.read(&mut original_tail).expect("read");
    clone.read(&mut clone_tail).expect("read");
    // Same position at clone time: identical next bytes.
    assert_eq!(original_tail, clone_tail);

    // Draining one side further must not move the other.
    let mut original_more = [0u8; 8];
    original.read(&mut original_more).expect("read");
    let mut clone_more = [0u8; 8];
    clone.read(&mut clone_more).expect("read");
    assert_eq!(original_more, clone_more);
}

#[test]
fn output_length_setter_validates() {
    let mut mac = Hash::kmac128(b"key", b"").expect("kmac");
    assert!(matches!(
        mac.set_output_bits(0),
        Err(HashError::OutOfRange(_))
    ));
    assert!(matches!(
        mac.set_output_bits(12),
        Err(HashError::OutOfRange(_))
    ));
    mac.set_output_bits(128).expect("valid length");
    let result = mac.compute(b"short tag").expect("compute");
    assert_eq!(result.len(), 16);
}

#[test]
fn output_length_is_frozen_once_finalized() {
    let mut mac = Hash::kmacxof128(b"key", b"").expect("kmac");
    mac.update(b"data");
    let mut out = [0u8; 4];
    mac.read(&mut out).expect("read");
    assert!(matches!(
        mac.set_output_bits(256),
        Err(HashError::InvalidArgument(_))
    ));
}

#[test]
fn fixed_variant_refuses_overdrain() {
    let mut mac = Hash::kmac128(b"key", b"").expect("kmac");
    mac.update(b"data");
    let mut out = [0u8; 33];
    assert!(matches!(
        mac.read(&mut out),
        Err(HashError::InvalidArgument(_))
    ));
}

#[test]
fn xof_mode_has_no_fixed_output_size() {
    let mac = Hash::kmacxof128(b"key", b"").expect("kmac");
    assert_eq!(mac.output_size(), None);
    assert!(matches!(
        mac.output_size_bytes(),
        Err(HashError::NotImplemented(_))
    ));
}

#[test]
fn output_length_reconfigures_the_tag_width() {
    for bits in [64usize, 128, 256, 1024] {
        let mut mac = Hash::kmac256(b"key", b"width test").expect("kmac");
        mac.set_output_bits(bits).expect("set");
        let result = mac.compute(b"message").expect("compute");
        assert_eq!(result.len(), bits / 8);
    }
}
