//! Extendable-output capability
//!
//! An orthogonal capability a transform may hold in addition to the base
//! contract: instead of one fixed-size result, the output is drained
//! incrementally to any length — bounded by a configured limit, or unbounded.

use crate::{Result, Transform};

/// A transform whose output is an arbitrary-length stream.
///
/// Output is drained through [`read`](XofTransform::read) in caller-chosen
/// chunk sizes. Fixed-length configurations refuse to drain past their
/// configured limit; unbounded configurations drain indefinitely. Drain
/// position is per-instance state: a clone taken mid-drain continues from the
/// same position, and clone and original then drain independently.
pub trait XofTransform: Transform {
    /// Configure the output length in bits.
    ///
    /// `0` selects unbounded mode where the construction allows it.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for a zero or non-multiple-of-8 length on a
    /// fixed-output configuration.
    fn set_output_bits(&mut self, bits: usize) -> Result<()>;

    /// Drain exactly `out.len()` bytes of output.
    ///
    /// Callable repeatedly; successive reads continue where the previous one
    /// stopped.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when a fixed-length configuration would be drained
    /// past its configured output length.
    fn read(&mut self, out: &mut [u8]) -> Result<()>;

    /// Independent deep copy preserving absorbed state, configured output
    /// length, and drain position.
    fn clone_xof(&self) -> Box<dyn XofTransform>;
}

impl Clone for Box<dyn XofTransform> {
    fn clone(&self) -> Self {
        self.clone_xof()
    }
}
