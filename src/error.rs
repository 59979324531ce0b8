// src/error.rs

use thiserror::Error;

/// Failures of the analysis layer. Plot functions box plotters errors instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("frequency window [{min_hz}, {max_hz}] Hz selected no samples")]
    EmptyWindow { min_hz: f64, max_hz: f64 },

    #[error("invalid window [{min}, {max}]: bounds must be finite and ordered")]
    InvalidWindow { min: f64, max: f64 },

    #[error("need at least {required} points, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("all x values are identical; slope is undefined")]
    DegenerateX,

    #[error("invalid smoothing parameters: {0}")]
    InvalidSmoothing(String),

    #[error("no local minimum found in the derivative")]
    NoTransition,

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("no usable numeric rows in {0}")]
    NoRows(String),

    #[error("values cannot be ordered: {0}")]
    Unordered(String),

    #[error("least-squares solve failed: {0}")]
    Solve(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

// src/error.rs
