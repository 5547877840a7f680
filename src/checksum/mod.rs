//! Non-cryptographic checksum transforms
//!
//! Checksums implement the same incremental contract as every digest, so
//! they stream, clone, and compose identically; they just trade collision
//! resistance for speed.

pub mod adler32;
pub mod crc;

pub use adler32::Adler32;
pub use crc::{Crc, CrcParameters, CrcSpec};
