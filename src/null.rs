//! Buffering passthrough transform
//!
//! Degenerate instance of the contract: no block structure, no defined
//! output size, and finalization returns the buffered input unchanged.
//! Contract tests and key-wrapping tests use it to observe exactly what a
//! composition feeds its inner transform.

use crate::transform::DEFAULT_BUFFER_SIZE;
use crate::{HashError, HashResult, Result, Transform};

/// Transform that buffers input and returns it unchanged on finalize.
#[derive(Clone, Debug)]
pub struct NullTransform {
    buffered: Vec<u8>,
    buffer_size: usize,
}

impl Default for NullTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl NullTransform {
    /// Create an empty passthrough transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffered: Vec::new(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Bytes buffered since the last reset.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffered
    }
}

impl Transform for NullTransform {
    fn name(&self) -> &str {
        "Null"
    }

    fn block_size(&self) -> Option<usize> {
        None
    }

    fn output_size(&self) -> Option<usize> {
        None
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn set_buffer_size(&mut self, bytes: usize) -> Result<()> {
        if bytes == 0 {
            return Err(HashError::invalid_argument("buffer size must be non-zero"));
        }
        self.buffer_size = bytes;
        Ok(())
    }

    fn initialize(&mut self) {
        self.buffered.clear();
    }

    fn update(&mut self, data: &[u8]) {
        self.buffered.extend_from_slice(data);
    }

    fn finalize(&mut self) -> Result<HashResult> {
        Ok(HashResult::new(std::mem::take(&mut self.buffered)))
    }

    fn clone_box(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}
