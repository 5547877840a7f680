//! HMAC against RFC 4231 vectors, and differentially against the `hmac`
//! crate around the block-size key boundary.

use hex_literal::hex;
use rand::RngCore;
use sigil_hashing::{Hash, HashError, Transform, TransformExt};

#[test]
fn rfc4231_case_2_short_text_key() {
    let mut mac = Hash::hmac_sha256(b"Jefe").expect("hmac");
    let result = mac
        .compute(b"what do ya want for nothing?")
        .expect("compute");
    assert_eq!(
        result.as_bytes(),
        hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
    );
}

#[test]
fn rfc4231_case_3_repeated_bytes() {
    let mut mac = Hash::hmac_sha256(&[0xAA; 20]).expect("hmac");
    let result = mac.compute(&[0xDD; 50]).expect("compute");
    assert_eq!(
        result.as_bytes(),
        hex!("773ea91e36800e46854db8ebd09181a72959098b3ef8c122d9635514ced565fe")
    );
}

#[test]
fn rfc4231_case_6_key_longer_than_block() {
    // 131-byte key: pre-hashed into the working key.
    let mut mac = Hash::hmac_sha256(&[0xAA; 131]).expect("hmac");
    let result = mac
        .compute(b"Test Using Larger Than Block-Size Key - Hash Key First")
        .expect("compute");
    assert_eq!(
        result.as_bytes(),
        hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54")
    );
}

/// Differential check against the `hmac` crate for a given key.
fn assert_matches_reference(key: &[u8], message: &[u8]) {
    use hmac::{Hmac as RefHmac, Mac};
    use sha2::Sha256;

    let mut reference = <RefHmac<Sha256>>::new_from_slice(key).expect("reference accepts any key");
    reference.update(message);
    let expected = reference.finalize().into_bytes();

    let mut ours = Hash::hmac_sha256(key).expect("hmac");
    let result = ours.compute(message).expect("compute");
    assert_eq!(
        result.as_bytes(),
        expected.as_slice(),
        "key length {}",
        key.len()
    );
}

#[test]
fn key_length_boundary_around_the_block_size() {
    // SHA-256 block size is 64: one byte under, exact, one byte over.
    let mut rng = rand::rng();
    let mut message = vec![0u8; 300];
    rng.fill_bytes(&mut message);

    for key_len in [63usize, 64, 65] {
        let mut key = vec![0u8; key_len];
        rng.fill_bytes(&mut key);
        assert_matches_reference(&key, &message);
    }
}

#[test]
fn assorted_key_lengths_match_reference() {
    let mut rng = rand::rng();
    for key_len in [0usize, 1, 16, 32, 128, 257] {
        let mut key = vec![0u8; key_len];
        rng.fill_bytes(&mut key);
        assert_matches_reference(&key, b"fixed message");
    }
}

#[test]
fn hmac_over_sha3_matches_reference() {
    use hmac::{Hmac as RefHmac, Mac};
    use sha3::Sha3_256;

    let key = b"a sha3 key";
    let message = b"hmac generalizes over any block-structured digest";

    let mut reference = <RefHmac<Sha3_256>>::new_from_slice(key).expect("key");
    reference.update(message);
    let expected = reference.finalize().into_bytes();

    let mut ours = Hash::hmac(Box::new(Hash::sha3_256()), key).expect("hmac");
    let result = ours.compute(message).expect("compute");
    assert_eq!(result.as_bytes(), expected.as_slice());
}

#[test]
fn set_key_rederives_pads() {
    let mut mac = Hash::hmac_sha256(b"first key").expect("hmac");
    let first = mac.compute(b"message").expect("compute");

    mac.set_key(b"second key").expect("set_key");
    let second = mac.compute(b"message").expect("compute");
    assert_ne!(first, second);

    mac.set_key(b"first key").expect("set_key");
    assert_eq!(mac.compute(b"message").expect("compute"), first);
}

#[test]
fn clone_carries_key_and_state() {
    let mut mac = Hash::hmac_sha256(b"cloned key").expect("hmac");
    mac.update(b"partial ");

    let mut clone = mac.clone_box();
    mac.update(b"message");
    clone.update(b"message");

    assert_eq!(
        mac.finalize().expect("finalize"),
        clone.finalize().expect("finalize")
    );
}

#[test]
fn exposes_inner_geometry() {
    let mac = Hash::hmac_sha256(b"key").expect("hmac");
    assert_eq!(mac.name(), "HMAC-SHA-256");
    assert_eq!(mac.block_size(), Some(64));
    assert_eq!(mac.output_size(), Some(32));
}

#[test]
fn degenerate_inner_is_rejected() {
    assert!(matches!(
        Hash::hmac(Box::new(Hash::null()), b"key"),
        Err(HashError::InvalidArgument(_))
    ));
}
