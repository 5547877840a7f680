//! Error taxonomy shared by every transform and composition

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by transforms, compositions, and hashing I/O.
///
/// Every public operation either returns a valid result or raises one of
/// these kinds synchronously at the violated precondition. After a failure
/// the instance's accumulator state is unspecified; call
/// [`initialize`](crate::Transform::initialize) before reuse.
#[derive(Debug, Error)]
pub enum HashError {
    /// Malformed caller input: ill-sized buffers, bad ranges, rejected keys.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configurable quantity outside its permitted range, e.g. a zero or
    /// non-byte-aligned extendable-output length.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// The operation is meaningless for this transform.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Underlying file or stream access failed.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A named file was not present.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An asynchronous operation was cancelled between chunks.
    #[error("operation cancelled")]
    Cancelled,
}

impl HashError {
    /// Create an `InvalidArgument` error
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an `OutOfRange` error
    #[must_use]
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Create a `NotImplemented` error
    #[must_use]
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
