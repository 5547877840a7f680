//! Keyed compositions: constructions that own an inner transform and reduce
//! keyed authentication to the primitive contract

pub mod blake2;
pub mod hmac;
pub mod kmac;

pub use blake2::{Blake2bMacTransform, Blake2sMacTransform};
pub use hmac::Hmac;
pub use kmac::Kmac;

use zeroize::{Zeroize, Zeroizing};

/// Owned secret key bytes with guaranteed zeroing.
///
/// The live buffer is overwritten with zeros on [`clear`](Self::clear) and
/// again when the owner is dropped, so key material does not outlive its
/// last use. Accessors hand out defensive copies only.
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: Zeroizing<Vec<u8>>,
}

impl KeyMaterial {
    /// Defensively copy `key` into zeroizing storage.
    #[must_use]
    pub fn new(key: &[u8]) -> Self {
        Self {
            bytes: Zeroizing::new(key.to_vec()),
        }
    }

    /// Key length in bytes. Unchanged by [`clear`](Self::clear).
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Defensive copy of the key bytes, itself zeroized on drop.
    #[must_use]
    pub fn value(&self) -> Zeroizing<Vec<u8>> {
        self.bytes.clone()
    }

    /// Overwrite the live buffer with zeros, preserving its length.
    ///
    /// Idempotent: clearing an already-cleared key is a no-op.
    pub fn clear(&mut self) {
        self.bytes.as_mut_slice().zeroize();
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyMaterial({} bytes)", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_zeroes_in_place_and_is_idempotent() {
        let mut key = KeyMaterial::new(b"super secret");
        key.clear();
        assert_eq!(key.len(), 12);
        assert_eq!(key.value().as_slice(), &[0u8; 12]);
        key.clear();
        assert_eq!(key.value().as_slice(), &[0u8; 12]);
    }

    #[test]
    fn value_is_a_defensive_copy() {
        let mut key = KeyMaterial::new(b"abc");
        let copy = key.value();
        key.clear();
        assert_eq!(copy.as_slice(), b"abc");
    }
}
