//! The incremental-transform contract every digest, checksum, and keyed
//! composition implements
//!
//! A transform is a sequential state machine: bytes go in through any number
//! of [`update`](Transform::update) calls, in any chunking, and
//! [`finalize`](Transform::finalize) produces the result of everything
//! consumed since the last reset. Output never depends on how the input was
//! chunked across calls.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::{HashError, HashResult, Result};

/// Default I/O chunk size for stream and file hashing, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Text encodings accepted by [`TransformExt::compute_text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextEncoding {
    /// UTF-8 (the native `str` encoding)
    Utf8,
    /// UTF-16, little-endian code units
    Utf16Le,
    /// UTF-16, big-endian code units
    Utf16Be,
}

impl TextEncoding {
    /// Encode `text` into bytes under this encoding.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
            Self::Utf16Be => text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
        }
    }
}

/// Incremental hashing contract.
///
/// # Laws
///
/// - **Chunking invariance**: feeding a byte sequence through any partition
///   into consecutive `update` calls yields the same `finalize` output as a
///   single call with the whole sequence.
/// - **Reset idempotence**: after `initialize()` (or an implicit reset from
///   `finalize()`) the instance is indistinguishable from a freshly
///   constructed one with the same configuration.
/// - **Clone independence**: a clone shares no mutable storage with the
///   original; mutating either never affects the other.
///
/// Instances are single-threaded state machines. Callers needing parallelism
/// clone one instance per thread before any mutation.
pub trait Transform: Send {
    /// Human-readable algorithm name, e.g. `"SHA-256"` or `"HMAC-SHA-256"`.
    fn name(&self) -> &str;

    /// Input block size in bytes the construction is organized around.
    ///
    /// `None` for transforms with no natural block structure (degenerate
    /// transforms); such transforms cannot serve as an HMAC inner.
    fn block_size(&self) -> Option<usize>;

    /// Output size in bytes, or `None` when undefined.
    fn output_size(&self) -> Option<usize>;

    /// Strict output size accessor.
    ///
    /// # Errors
    ///
    /// `NotImplemented` for degenerate transforms whose output size is
    /// undefined.
    fn output_size_bytes(&self) -> Result<usize> {
        self.output_size().ok_or_else(|| {
            HashError::not_implemented(format!("{} has no defined output size", self.name()))
        })
    }

    /// Caller-tunable I/O chunk size hint used by stream and file hashing.
    fn buffer_size(&self) -> usize;

    /// Set the I/O chunk size hint.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a zero size.
    fn set_buffer_size(&mut self, bytes: usize) -> Result<()>;

    /// Reset accumulator state to the canonical start value. Infallible.
    fn initialize(&mut self);

    /// Consume `data`, advancing accumulator state. No output is produced.
    fn update(&mut self, data: &[u8]);

    /// Consume `len` bytes of `data` starting at `offset`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `offset + len` overflows or exceeds
    /// `data.len()`.
    fn update_range(&mut self, data: &[u8], offset: usize, len: usize) -> Result<()> {
        let end = offset.checked_add(len).ok_or_else(|| {
            HashError::invalid_argument(format!("range {offset}+{len} overflows"))
        })?;
        if end > data.len() {
            return Err(HashError::invalid_argument(format!(
                "range {offset}..{end} exceeds buffer of {} bytes",
                data.len()
            )));
        }
        self.update(&data[offset..end]);
        Ok(())
    }

    /// Produce the result of all bytes consumed since the last reset, then
    /// implicitly re-initialize so the instance is immediately reusable.
    ///
    /// # Errors
    ///
    /// `NotImplemented` for transforms whose output size is undefined and
    /// that define no other finalization behavior.
    fn finalize(&mut self) -> Result<HashResult>;

    /// Independent deep copy: identical configuration and accumulator state,
    /// no shared mutable storage.
    fn clone_box(&self) -> Box<dyn Transform>;
}

impl Clone for Box<dyn Transform> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Byte range selecting part of a file or reader for hashing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteRange {
    /// Offset of the first byte to hash.
    pub from: u64,
    /// Number of bytes to hash, or `None` for "through the end".
    pub length: Option<u64>,
}

impl ByteRange {
    /// The whole input.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// `length` bytes starting at `from`.
    #[must_use]
    pub fn new(from: u64, length: Option<u64>) -> Self {
        Self { from, length }
    }
}

/// Whole-input convenience compositions, layered strictly on
/// [`Transform::update`] and [`Transform::finalize`].
pub trait TransformExt: Transform {
    /// Hash a whole in-memory buffer: initialize, update, finalize.
    ///
    /// # Errors
    ///
    /// Propagates [`Transform::finalize`] failures.
    fn compute(&mut self, data: &[u8]) -> Result<HashResult> {
        self.initialize();
        self.update(data);
        self.finalize()
    }

    /// Hash text under the given encoding.
    ///
    /// # Errors
    ///
    /// Propagates [`Transform::finalize`] failures.
    fn compute_text(&mut self, text: &str, encoding: TextEncoding) -> Result<HashResult> {
        self.compute(&encoding.encode(text))
    }

    /// Hash everything a reader yields, in `buffer_size()` chunks.
    ///
    /// # Errors
    ///
    /// `Io` on read failures; propagates finalize failures.
    fn compute_reader<R: Read>(&mut self, mut reader: R) -> Result<HashResult> {
        self.initialize();
        let mut buf = vec![0u8; self.buffer_size()];
        let mut total = 0u64;
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            self.update(&buf[..n]);
            total += n as u64;
        }
        tracing::debug!(transform = self.name(), bytes = total, "reader hashed");
        self.finalize()
    }

    /// Hash a byte range of a file.
    ///
    /// # Errors
    ///
    /// `NotFound` when the file does not exist, `Io` on other access
    /// failures, `InvalidArgument` when the requested range extends past the
    /// end of the file.
    fn compute_file(&mut self, path: &Path, range: ByteRange) -> Result<HashResult> {
        let mut file = File::open(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                HashError::NotFound(path.to_path_buf())
            } else {
                HashError::Io(err)
            }
        })?;
        if range.from > 0 {
            file.seek(SeekFrom::Start(range.from))?;
        }
        match range.length {
            None => self.compute_reader(file),
            Some(want) => {
                self.initialize();
                let mut buf = vec![0u8; self.buffer_size()];
                let mut remaining = want;
                while remaining > 0 {
                    let cap = remaining.min(buf.len() as u64) as usize;
                    let n = file.read(&mut buf[..cap])?;
                    if n == 0 {
                        return Err(HashError::invalid_argument(
                            "range extends past end of file",
                        ));
                    }
                    self.update(&buf[..n]);
                    remaining -= n as u64;
                }
                self.finalize()
            }
        }
    }
}

impl<T: Transform + ?Sized> TransformExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_encodings_differ_by_byte_order() {
        assert_eq!(TextEncoding::Utf8.encode("ab"), b"ab");
        assert_eq!(TextEncoding::Utf16Le.encode("ab"), vec![0x61, 0, 0x62, 0]);
        assert_eq!(TextEncoding::Utf16Be.encode("ab"), vec![0, 0x61, 0, 0x62]);
    }
}
