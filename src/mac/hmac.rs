//! HMAC over any block-structured transform
//!
//! Realizes `H(opad ‖ H(ipad ‖ message))` generically: the inner transform
//! is owned as a trait object, so any digest satisfying the contract — SHA
//! family, SHA-3, Blake2 — becomes a keyed MAC without knowing it.

use zeroize::Zeroizing;

use super::KeyMaterial;
use crate::{HashError, HashResult, Result, Transform};

const IPAD_BYTE: u8 = 0x36;
const OPAD_BYTE: u8 = 0x5C;

/// Keyed HMAC composition over an owned inner transform.
#[derive(Clone)]
pub struct Hmac {
    inner: Box<dyn Transform>,
    key: KeyMaterial,
    working_key: Zeroizing<Vec<u8>>,
    ipad: Zeroizing<Vec<u8>>,
    opad: Zeroizing<Vec<u8>>,
    name: String,
    block_size: usize,
}

impl Hmac {
    /// Build an HMAC over `inner` with the given key.
    ///
    /// Keys longer than the inner block size are replaced by the inner
    /// transform's digest of the key; shorter keys are zero-padded into the
    /// pads.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the inner transform has no defined block size
    /// (pads cannot be derived), or when its digest of a long key is wider
    /// than its own block.
    pub fn new(inner: Box<dyn Transform>, key: &[u8]) -> Result<Self> {
        let block_size = inner.block_size().ok_or_else(|| {
            HashError::invalid_argument(format!(
                "{} has no block size; HMAC requires a block-structured inner transform",
                inner.name()
            ))
        })?;
        let mut hmac = Self {
            name: format!("HMAC-{}", inner.name()),
            inner,
            key: KeyMaterial::new(key),
            working_key: Zeroizing::new(Vec::new()),
            ipad: Zeroizing::new(Vec::new()),
            opad: Zeroizing::new(Vec::new()),
            block_size,
        };
        hmac.rekey()?;
        hmac.initialize();
        Ok(hmac)
    }

    /// Replace the key; pads are re-derived and the computation restarts.
    ///
    /// # Errors
    ///
    /// Same conditions as [`new`](Self::new).
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        self.key = KeyMaterial::new(key);
        self.rekey()?;
        self.initialize();
        Ok(())
    }

    /// Defensive copy of the caller-supplied key.
    #[must_use]
    pub fn key(&self) -> Zeroizing<Vec<u8>> {
        self.key.value()
    }

    /// Zero the stored key, working key, and both pads in place.
    pub fn clear(&mut self) {
        use zeroize::Zeroize;
        self.key.clear();
        self.working_key.as_mut_slice().zeroize();
        self.ipad.as_mut_slice().zeroize();
        self.opad.as_mut_slice().zeroize();
    }

    /// Derive the working key and both pads from the stored key.
    fn rekey(&mut self) -> Result<()> {
        let raw = self.key.value();
        let working: Zeroizing<Vec<u8>> = if raw.len() > self.block_size {
            self.inner.initialize();
            self.inner.update(&raw);
            Zeroizing::new(self.inner.finalize()?.to_vec())
        } else {
            raw
        };
        if working.len() > self.block_size {
            return Err(HashError::invalid_argument(format!(
                "{} digest is wider than its own block",
                self.inner.name()
            )));
        }
        let mut ipad = Zeroizing::new(vec![IPAD_BYTE; self.block_size]);
        let mut opad = Zeroizing::new(vec![OPAD_BYTE; self.block_size]);
        for (index, &byte) in working.iter().enumerate() {
            ipad[index] ^= byte;
            opad[index] ^= byte;
        }
        self.working_key = working;
        self.ipad = ipad;
        self.opad = opad;
        Ok(())
    }
}

impl Transform for Hmac {
    fn name(&self) -> &str {
        &self.name
    }

    fn block_size(&self) -> Option<usize> {
        Some(self.block_size)
    }

    fn output_size(&self) -> Option<usize> {
        self.inner.output_size()
    }

    fn buffer_size(&self) -> usize {
        self.inner.buffer_size()
    }

    fn set_buffer_size(&mut self, bytes: usize) -> Result<()> {
        self.inner.set_buffer_size(bytes)
    }

    fn initialize(&mut self) {
        self.inner.initialize();
        self.inner.update(&self.ipad);
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(&mut self) -> Result<HashResult> {
        // Inner finalize resets the inner transform, leaving it ready for
        // the outer pass.
        let inner_hash = self.inner.finalize()?;
        self.inner.update(&self.opad);
        self.inner.update(inner_hash.as_bytes());
        let result = self.inner.finalize()?;
        // Re-arm for immediate reuse.
        self.inner.update(&self.ipad);
        Ok(result)
    }

    fn clone_box(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}
