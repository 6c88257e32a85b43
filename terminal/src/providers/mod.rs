//! External service adapters
//!
//! The terminal talks to three services through the traits below, so the
//! workflows can run against the real HTTP clients or against test doubles.

use async_trait::async_trait;

use riskterm_risk::PriceSeries;

use crate::error::TerminalResult;
use crate::types::{OptimizationResult, PortfolioRequest, PriceTable, SecurityProfile, Symbol, VarResponse};

pub mod backend;
pub mod fmp;
pub mod openfigi;

pub use backend::HttpRiskBackend;
pub use fmp::FmpClient;
pub use openfigi::OpenFigiResolver;

/// Source of company profiles and daily closes
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Profile for `symbol`, or `None` when the provider does not know it
    async fn profile(&self, symbol: &Symbol) -> TerminalResult<Option<SecurityProfile>>;

    /// Recent daily closes for `symbol`, in ascending date order
    async fn historical_prices(&self, symbol: &Symbol) -> TerminalResult<PriceSeries>;
}

/// Remote VaR / optimization service
#[async_trait]
pub trait RiskBackend: Send + Sync {
    async fn calculate_var(&self, request: &PortfolioRequest) -> TerminalResult<VarResponse>;

    async fn optimize_portfolio(&self, request: &PortfolioRequest) -> TerminalResult<OptimizationResult>;

    async fn fetch_prices(&self, symbols: &[Symbol]) -> TerminalResult<PriceTable>;
}

/// ISIN to ticker mapping
#[async_trait]
pub trait IdentifierResolver: Send + Sync {
    /// First ticker mapped to `isin`, or `None` when there is no match
    async fn resolve_isin(&self, isin: &str) -> TerminalResult<Option<Symbol>>;
}

/// Turn a non-success response into a `ServiceError`
pub(crate) async fn ensure_success(
    service: &str,
    response: reqwest::Response,
) -> TerminalResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(crate::error::TerminalError::ServiceError {
        service: service.to_string(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message
        },
        status: Some(status.as_u16()),
    })
}

/// Join a relative path onto a configured base URL, keeping any base path
pub(crate) fn endpoint(base_url: &str, path: &str) -> TerminalResult<url::Url> {
    let base = url::Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
    Ok(base.join(path.trim_start_matches('/'))?)
}
