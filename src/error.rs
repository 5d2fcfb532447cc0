use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by matrix and network operations.
///
/// Every failure is detected eagerly at the offending call, and shape checks
/// run before any in-place mutation, so an `Err` never leaves a value
/// half-updated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A matrix was requested with a zero row or column count.
    #[error("matrix dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// Operand shapes are incompatible for the requested operation.
    #[error("{op}: expected shape {expected:?}, got {got:?}")]
    DimensionMismatch {
        op: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// An activation name outside the supported set.
    #[error("unknown activation `{0}` (expected sigmoid, tanh, or relu)")]
    UnknownActivation(String),

    /// A weight record whose embedded shapes are mutually inconsistent.
    #[error("malformed weight record: {0}")]
    MalformedRecord(String),
}
