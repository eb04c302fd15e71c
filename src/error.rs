//! Error taxonomy shared by both engines.

/// Errors raised by the optimizers.
///
/// Dimension and bound errors surface at construction. Fitness errors
/// surface from evaluation. Nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimError {
    #[error("InvalidDimension: {what} must be positive, got {value}")]
    InvalidDimension { what: &'static str, value: usize },
    #[error("BoundsMismatch: expected {expected} bounds, got {actual}")]
    BoundsMismatch { expected: usize, actual: usize },
    #[error("InvalidBound: dimension {dimension} has lower={lower}, upper={upper}")]
    InvalidBound {
        dimension: usize,
        lower: f64,
        upper: f64,
    },
    #[error("DegenerateFitness: cumulative weight total is {total}")]
    DegenerateFitness { total: f64 },
    #[error("NotInitialized: call init before stepping the optimizer")]
    NotInitialized,
}

impl OptimError {
    pub(crate) fn invalid_dimension(what: &'static str, value: usize) -> Self {
        Self::InvalidDimension { what, value }
    }

    pub(crate) fn degenerate(total: f64) -> Self {
        Self::DegenerateFitness { total }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptimError>;
