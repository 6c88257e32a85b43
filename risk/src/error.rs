//! Error types for the risk core

use thiserror::Error;

/// Errors raised while building estimators, series or reports.
///
/// The rolling computations themselves never fail: a window that is too
/// short yields a sentinel value instead of an error.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid window: window_size {window_size} must be >= min_observations {min_observations} >= 1")]
    InvalidWindow {
        window_size: usize,
        min_observations: usize,
    },

    #[error("Invalid moving average window: {0} (must be positive)")]
    InvalidMovingAverageWindow(usize),

    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Length mismatch: {values} values cannot be aligned to {dates} dates")]
    LengthMismatch { values: usize, dates: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RiskError>;
