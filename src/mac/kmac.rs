//! KMAC: keyed authentication over an extendable-output transform
//!
//! SP 800-185 construction: the key is absorbed as a length-prefixed,
//! rate-padded encoding ahead of the message, and the requested output
//! length is right-encoded after it — once. Output then drains like any
//! extendable output, in fixed-length or unbounded (KMACXOF) mode.

use super::KeyMaterial;
use crate::digests::{cshake128, cshake256};
use crate::{HashError, HashResult, Result, Transform, XofTransform};

/// SP 800-185 `left_encode`: big-endian value bytes preceded by their count.
fn left_encode(value: u64) -> Vec<u8> {
    let significant = ((64 - value.leading_zeros() as usize + 7) / 8).max(1);
    let mut out = Vec::with_capacity(significant + 1);
    out.push(significant as u8);
    out.extend_from_slice(&value.to_be_bytes()[8 - significant..]);
    out
}

/// SP 800-185 `right_encode`: big-endian value bytes followed by their count.
fn right_encode(value: u64) -> Vec<u8> {
    let significant = ((64 - value.leading_zeros() as usize + 7) / 8).max(1);
    let mut out = Vec::with_capacity(significant + 1);
    out.extend_from_slice(&value.to_be_bytes()[8 - significant..]);
    out.push(significant as u8);
    out
}

/// Keyed MAC over an owned extendable-output transform.
///
/// Fixed-output instances finalize to their configured length; XOF-mode
/// instances drain indefinitely through [`read`](XofTransform::read). The
/// length suffix is appended exactly once, guarded by the `finalized` flag,
/// so repeated drains compose into one logical output stream.
#[derive(Clone)]
pub struct Kmac {
    inner: Box<dyn XofTransform>,
    key: KeyMaterial,
    rate: usize,
    output_bits: usize,
    xof_mode: bool,
    finalized: bool,
    drained: u64,
    name: String,
}

impl Kmac {
    /// KMAC128 with a 256-bit default output length.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from the generic form.
    pub fn v128(key: &[u8], customization: &[u8]) -> Result<Self> {
        let inner = Box::new(cshake128(b"KMAC", customization));
        Self::over_xof("KMAC128", inner, key, 256, false)
    }

    /// KMAC256 with a 512-bit default output length.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from the generic form.
    pub fn v256(key: &[u8], customization: &[u8]) -> Result<Self> {
        let inner = Box::new(cshake256(b"KMAC", customization));
        Self::over_xof("KMAC256", inner, key, 512, false)
    }

    /// KMACXOF128: unbounded extendable output.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from the generic form.
    pub fn xof128(key: &[u8], customization: &[u8]) -> Result<Self> {
        let inner = Box::new(cshake128(b"KMAC", customization));
        Self::over_xof("KMACXOF128", inner, key, 0, true)
    }

    /// KMACXOF256: unbounded extendable output.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from the generic form.
    pub fn xof256(key: &[u8], customization: &[u8]) -> Result<Self> {
        let inner = Box::new(cshake256(b"KMAC", customization));
        Self::over_xof("KMACXOF256", inner, key, 0, true)
    }

    /// Generic form over any extendable-output transform.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the inner transform has no defined block size
    /// (the key encoding pads to the rate, which must be known).
    pub fn over_xof(
        name: &str,
        inner: Box<dyn XofTransform>,
        key: &[u8],
        output_bits: usize,
        xof_mode: bool,
    ) -> Result<Self> {
        let rate = inner.block_size().ok_or_else(|| {
            HashError::invalid_argument(format!(
                "{} has no block size; the key encoding pads to the rate",
                inner.name()
            ))
        })?;
        let mut kmac = Self {
            inner,
            key: KeyMaterial::new(key),
            rate,
            output_bits,
            xof_mode,
            finalized: false,
            drained: 0,
            name: name.to_string(),
        };
        kmac.initialize();
        Ok(kmac)
    }

    /// Replace the key; the computation restarts.
    pub fn set_key(&mut self, key: &[u8]) {
        self.key = KeyMaterial::new(key);
        self.initialize();
    }

    /// Defensive copy of the key.
    #[must_use]
    pub fn key(&self) -> zeroize::Zeroizing<Vec<u8>> {
        self.key.value()
    }

    /// Zero the stored key in place.
    pub fn clear(&mut self) {
        self.key.clear();
    }

    /// Absorb `bytepad(encode_string(key), rate)` into a freshly reset inner.
    fn absorb_key(&mut self) {
        let key = self.key.value();
        let mut absorbed = 0usize;

        let rate_prefix = left_encode(self.rate as u64);
        self.inner.update(&rate_prefix);
        absorbed += rate_prefix.len();

        let bit_length = left_encode(key.len() as u64 * 8);
        self.inner.update(&bit_length);
        absorbed += bit_length.len();

        self.inner.update(&key);
        absorbed += key.len();

        let tail = absorbed % self.rate;
        if tail != 0 {
            self.inner.update(&vec![0u8; self.rate - tail]);
        }
    }

    /// Append the right-encoded output length exactly once.
    fn append_suffix(&mut self) {
        if self.finalized {
            return;
        }
        let bits = if self.xof_mode { 0 } else { self.output_bits as u64 };
        self.inner.update(&right_encode(bits));
        self.finalized = true;
    }
}

impl Transform for Kmac {
    fn name(&self) -> &str {
        &self.name
    }

    fn block_size(&self) -> Option<usize> {
        Some(self.rate)
    }

    fn output_size(&self) -> Option<usize> {
        if self.xof_mode {
            None
        } else {
            Some(self.output_bits / 8)
        }
    }

    fn buffer_size(&self) -> usize {
        self.inner.buffer_size()
    }

    fn set_buffer_size(&mut self, bytes: usize) -> Result<()> {
        self.inner.set_buffer_size(bytes)
    }

    fn initialize(&mut self) {
        self.inner.initialize();
        self.absorb_key();
        self.finalized = false;
        self.drained = 0;
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(&mut self) -> Result<HashResult> {
        if self.xof_mode {
            return Err(HashError::not_implemented(
                "KMACXOF produces extendable output; drain it with read",
            ));
        }
        let total = self.output_bits / 8;
        let remaining = total.saturating_sub(self.drained as usize);
        let mut out = vec![0u8; remaining];
        self.append_suffix();
        self.inner.read(&mut out)?;
        self.initialize();
        Ok(HashResult::new(out))
    }

    fn clone_box(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}

impl XofTransform for Kmac {
    fn set_output_bits(&mut self, bits: usize) -> Result<()> {
        if self.finalized {
            return Err(HashError::invalid_argument(
                "output length cannot change once output has been produced",
            ));
        }
        if self.xof_mode {
            // XOF mode is unbounded by construction; a nonzero value only
            // bounds draining.
            if bits % 8 != 0 {
                return Err(HashError::out_of_range(format!(
                    "output length {bits} bits is not a multiple of 8"
                )));
            }
        } else if bits == 0 || bits % 8 != 0 {
            return Err(HashError::out_of_range(format!(
                "output length must be a positive multiple of 8 bits, got {bits}"
            )));
        }
        self.output_bits = bits;
        Ok(())
    }

    fn read(&mut self, out: &mut [u8]) -> Result<()> {
        if self.output_bits > 0 {
            let limit = (self.output_bits / 8) as u64;
            if self.drained + out.len() as u64 > limit {
                return Err(HashError::invalid_argument(format!(
                    "drain of {} bytes exceeds configured output of {limit} bytes",
                    out.len()
                )));
            }
        }
        self.append_suffix();
        self.inner.read(out)?;
        self.drained += out.len() as u64;
        Ok(())
    }

    fn clone_xof(&self) -> Box<dyn XofTransform> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_encode_matches_examples() {
        assert_eq!(left_encode(0), vec![1, 0]);
        assert_eq!(left_encode(168), vec![1, 168]);
        assert_eq!(left_encode(4096), vec![2, 16, 0]);
    }

    #[test]
    fn right_encode_matches_examples() {
        assert_eq!(right_encode(0), vec![0, 1]);
        assert_eq!(right_encode(256), vec![1, 0, 2]);
        assert_eq!(right_encode(65536), vec![1, 0, 0, 3]);
    }

    #[test]
    fn suffix_is_appended_once() {
        let mut mac = Kmac::xof128(b"key", b"").expect("kmac");
        mac.update(b"data");
        let mut first = [0u8; 8];
        let mut second = [0u8; 8];
        mac.read(&mut first).expect("read");
        assert!(mac.finalized);
        mac.read(&mut second).expect("read");

        let mut whole = Kmac::xof128(b"key", b"").expect("kmac");
        whole.update(b"data");
        let mut both = [0u8; 16];
        whole.read(&mut both).expect("read");
        assert_eq!(&both[..8], first);
        assert_eq!(&both[8..], second);
    }
}
