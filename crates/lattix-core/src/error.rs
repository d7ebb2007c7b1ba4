use crate::dtype::Precision;

/// All errors returned by `lattix-core`.
///
/// Every variant describes a broken caller contract. Operator-style entry
/// points (`a + b`, backend dispatch) panic with the variant's message
/// instead of returning it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A shape does not agree with the number of values supplied for it.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// A multi-dimensional index has the wrong arity or is out of range.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// A nested literal has siblings of differing length, or mixes leaves
    /// and lists at one depth.
    #[error("ragged literal at {path:?}: expected {expected}, found {got}")]
    RaggedLiteral {
        path: Vec<usize>,
        expected: String,
        got: String,
    },

    /// The compute backend has no implementation for this precision.
    #[error("backend `{backend}` does not support {precision:?} precision")]
    UnsupportedPrecision {
        precision: Precision,
        backend: &'static str,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `lattix-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
