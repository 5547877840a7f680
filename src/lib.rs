//! Incremental hashing primitives behind one transform contract
//!
//! Checksums, digests, extendable-output functions, and keyed compositions
//! (HMAC over any digest, KMAC over any XOF, Blake2 keyed MACs) all speak
//! the same incremental contract: buffer bytes in any chunking, finalize to
//! an immutable result, reset implicitly, clone mid-computation. Secret key
//! material lives in zeroizing buffers for its whole lifetime.

#![forbid(unsafe_code)]

pub mod api;
pub mod async_result;
pub mod checksum;
pub mod compute;
pub mod digests;
pub mod error;
pub mod hash_result;
pub mod mac;
pub mod null;
pub mod streaming;
pub mod transform;
pub mod xof;

// Re-export error types
pub use error::{HashError, Result};

// Re-export the contract and its conveniences
pub use transform::{ByteRange, TextEncoding, Transform, TransformExt, DEFAULT_BUFFER_SIZE};
pub use xof::XofTransform;

// Re-export the main entry point and result types
pub use api::Hash;
pub use async_result::AsyncHashResult;
pub use hash_result::HashResult;

// Re-export concrete transforms and compositions
pub use checksum::{Adler32, Crc, CrcParameters, CrcSpec};
pub use mac::{Blake2bMacTransform, Blake2sMacTransform, Hmac, KeyMaterial, Kmac};
pub use null::NullTransform;
pub use streaming::{collect_hash, StreamHashChunk, StreamHashResult, StreamingHasher};
