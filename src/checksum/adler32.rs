//! Adler-32 rolling checksum with deferred modular reduction

use crate::transform::DEFAULT_BUFFER_SIZE;
use crate::{HashError, HashResult, Result, Transform};

/// Largest prime smaller than 2^16; the Adler-32 modulus.
const MOD_ADLER: u32 = 65521;

/// Largest batch length that cannot overflow the accumulators.
///
/// Both accumulators start a batch below `MOD_ADLER`. Across n unreduced
/// bytes `a` grows by at most `255 * n`, and `b` accumulates every
/// intermediate `a`, reaching at most
/// `(n + 1) * (MOD_ADLER - 1) + 255 * n * (n + 1) / 2`. 5552 is the largest
/// n keeping that bound below 2^32, so one reduction per batch boundary
/// suffices and the result stays bit-identical to the per-byte reference.
const NMAX: usize = 5552;

/// Adler-32 checksum transform.
///
/// Output is 4 bytes, big-endian, value `(b << 16) | a`.
#[derive(Clone, Debug)]
pub struct Adler32 {
    a: u32,
    b: u32,
    buffer_size: usize,
}

impl Adler32 {
    /// Create a checksum in the canonical start state (`a = 1`, `b = 0`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: 1,
            b: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Current checksum value `(b << 16) | a` over the bytes consumed so far.
    #[must_use]
    pub fn value(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for Adler32 {
    fn name(&self) -> &str {
        "Adler-32"
    }

    fn block_size(&self) -> Option<usize> {
        Some(4)
    }

    fn output_size(&self) -> Option<usize> {
        Some(4)
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
        self.a = 1;
        self.b = 0;
    }

    fn update(&mut self, data: &[u8]) {
        let mut a = self.a;
        let mut b = self.b;
        for batch in data.chunks(NMAX) {
            for &byte in batch {
                a += u32::from(byte);
                b += a;
            }
            a %= MOD_ADLER;
            b %= MOD_ADLER;
        }
        self.a = a;
        self.b = b;
    }

    fn finalize(&mut self) -> Result<HashResult> {
        let result = HashResult::from_u32_be(self.value());
        self.initialize();
        Ok(result)
    }

    fn clone_box(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}
