//! Error types for the risk terminal

use thiserror::Error;

use riskterm_risk::RiskError;

/// Result type for terminal operations
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Terminal error types
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Input validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Portfolio already holds the maximum number of positions
    #[error("Portfolio is full: at most {max} securities allowed")]
    PortfolioFull {
        /// Position limit
        max: usize,
    },

    /// Weight outside the accepted percentage range
    #[error("Invalid weight {0}: must be greater than 0 and at most 100 percent")]
    InvalidWeight(f64),

    /// Symbol already present in the portfolio
    #[error("{0} is already in the portfolio")]
    DuplicatePosition(String),

    /// No position at the given index
    #[error("No position at index {0}")]
    PositionNotFound(usize),

    /// Operation needs at least one position
    #[error("Portfolio is empty")]
    EmptyPortfolio,

    /// Market data provider has nothing for the symbol
    #[error("No data found for symbol {0}")]
    SymbolNotFound(String),

    /// Upstream service answered with an error status or payload
    #[error("{service} error: {message}")]
    ServiceError {
        /// Service name
        service: String,
        /// Error message
        message: String,
        /// HTTP status code, if any
        status: Option<u16>,
    },

    /// Response did not have the expected shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Risk core error
    #[error("Risk calculation error: {0}")]
    RiskError(#[from] RiskError),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TerminalError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            TerminalError::HttpError(e) => e.is_timeout() || e.is_connect(),
            TerminalError::ServiceError {
                status: Some(status),
                ..
            } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Check if error is a rejected portfolio edit
    pub fn is_portfolio_rule(&self) -> bool {
        matches!(
            self,
            TerminalError::PortfolioFull { .. }
                | TerminalError::InvalidWeight(_)
                | TerminalError::DuplicatePosition(_)
                | TerminalError::PositionNotFound(_)
        )
    }
}
