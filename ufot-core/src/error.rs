//! Error types for ufot-core.

use thiserror::Error;

/// Result type alias for ufot array operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for ufot array operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Operation needs at least one element (or one frame).
    #[error("input is empty")]
    EmptyInput,

    /// Two arrays that must agree in shape do not.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Subsampling step of zero.
    #[error("invalid subsampling step: {0}")]
    InvalidStep(usize),

    /// Percentile outside `[0, 100]`.
    #[error("invalid percentile: {0}")]
    InvalidPercentile(f64),
}

impl Error {
    pub(crate) fn shape_mismatch(expected: &[usize], found: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }
}
