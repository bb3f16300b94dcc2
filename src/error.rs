//! Error types for the FAP core.
//!
//! Constraint violations are never errors: they surface as fitness
//! penalties through [`crate::objective::ObjectiveEvaluator`]. The variants
//! here cover malformed input and caller contract violations only.

/// Result type alias using [`FapError`].
pub type Result<T> = std::result::Result<T, FapError>;

/// Errors raised by the FAP core.
#[derive(Debug, thiserror::Error)]
pub enum FapError {
    /// Malformed problem-definition input (missing or non-numeric token).
    #[error("parse error at token {position}: {message}")]
    Parse { position: usize, message: String },

    /// Problem file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup of an emitter id that the model does not contain.
    #[error("unknown emitter: {0}")]
    NotFound(String),

    /// Genotype length does not match the decoder's encoding.
    #[error("invalid genotype: expected length {expected}, got {actual}")]
    InvalidGenotype { expected: usize, actual: usize },

    /// Rejected penalty configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FapError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        FapError::Parse {
            position,
            message: message.into(),
        }
    }
}
