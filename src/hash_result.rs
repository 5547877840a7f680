//! Hash result type with encoding and typed extraction support

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::{HashError, Result};

/// Immutable byte buffer produced by finalizing a transform.
///
/// The length equals the producing transform's configured output size at the
/// moment of finalization.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashResult {
    /// Raw result bytes
    bytes: Vec<u8>,
}

impl HashResult {
    /// Create a new result from raw bytes
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Create a 4-byte result from a `u32`, stored big-endian.
    ///
    /// Checksum finalizers use this; the stored order matches the wire
    /// format those checksums specify.
    #[must_use]
    pub fn from_u32_be(value: u32) -> Self {
        Self {
            bytes: value.to_be_bytes().to_vec(),
        }
    }

    /// Get the raw bytes of the result
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to a `Vec<u8>`
    #[must_use]
    pub fn to_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Get the length of the result in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the result is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn exact<const N: usize>(&self) -> Result<[u8; N]> {
        <[u8; N]>::try_from(self.bytes.as_slice()).map_err(|_| {
            HashError::invalid_argument(format!(
                "result is {} bytes, expected exactly {N}",
                self.bytes.len()
            ))
        })
    }

    /// Extract a single-byte result.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the result is exactly 1 byte wide.
    pub fn as_u8(&self) -> Result<u8> {
        Ok(self.exact::<1>()?[0])
    }

    /// Extract a 2-byte result, big-endian (as stored).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the result is exactly 2 bytes wide.
    pub fn as_u16_be(&self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.exact()?))
    }

    /// Extract a 2-byte result, little-endian.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the result is exactly 2 bytes wide.
    pub fn as_u16_le(&self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.exact()?))
    }

    /// Extract a 4-byte result, big-endian (as stored).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the result is exactly 4 bytes wide.
    pub fn as_u32_be(&self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.exact()?))
    }

    /// Extract a 4-byte result, little-endian.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the result is exactly 4 bytes wide.
    pub fn as_u32_le(&self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.exact()?))
    }

    /// Extract an 8-byte result, big-endian (as stored).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the result is exactly 8 bytes wide.
    pub fn as_u64_be(&self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.exact()?))
    }

    /// Extract an 8-byte result, little-endian.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless the result is exactly 8 bytes wide.
    pub fn as_u64_le(&self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.exact()?))
    }

    /// Get the result as a hexadecimal string.
    ///
    /// Ungrouped output is unbroken lowercase hex. Grouped output is
    /// uppercase, split into 4-byte groups joined with `-`, e.g.
    /// `11E60398-DEADBEEF`.
    #[must_use]
    pub fn to_hex(&self, grouped: bool) -> String {
        if !grouped {
            return hex::encode(&self.bytes);
        }
        self.bytes
            .chunks(4)
            .map(|chunk| hex::encode_upper(chunk))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Get the result as a base64 string
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::{engine::general_purpose, Engine as _};
        general_purpose::STANDARD.encode(&self.bytes)
    }

    /// Get the result as a base64url string (URL-safe)
    #[must_use]
    pub fn to_base64url(&self) -> String {
        base64_url::encode(&self.bytes)
    }

    /// Constant-time equality over the raw bytes.
    ///
    /// Unlike `==`, the comparison time does not depend on where the first
    /// differing byte sits. Results of different lengths compare unequal.
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl From<Vec<u8>> for HashResult {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<HashResult> for Vec<u8> {
    fn from(result: HashResult) -> Self {
        result.bytes
    }
}

impl AsRef<[u8]> for HashResult {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex(false))
    }
}
