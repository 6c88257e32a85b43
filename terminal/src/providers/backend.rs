//! HTTP client for the remote risk backend
//!
//! The backend computes parametric, historical, Monte-Carlo and
//! Cornish-Fisher VaR and runs portfolio optimization; this client only
//! carries requests and responses.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::BackendConfig;
use crate::error::{TerminalError, TerminalResult};
use crate::providers::{endpoint, ensure_success, RiskBackend};
use crate::types::{OptimizationResult, PortfolioRequest, PriceRequest, PriceTable, Symbol, VarResponse};

const SERVICE: &str = "risk backend";

/// Risk backend over HTTP
pub struct HttpRiskBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpRiskBackend {
    pub fn new(config: BackendConfig) -> TerminalResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TerminalError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> TerminalResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = endpoint(&self.config.base_url, path)?;
        debug!(url = %url, "POST to risk backend");

        let response = self.client.post(url).json(body).send().await?;
        let response = ensure_success(SERVICE, response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RiskBackend for HttpRiskBackend {
    async fn calculate_var(&self, request: &PortfolioRequest) -> TerminalResult<VarResponse> {
        info!(symbols = request.symbols.len(), "Requesting portfolio VaR");

        let response: VarResponse = self.post("calculate_var", request).await?;
        match response {
            VarResponse::Error { error } => Err(TerminalError::ServiceError {
                service: SERVICE.to_string(),
                message: error,
                status: None,
            }),
            response => Ok(response),
        }
    }

    async fn optimize_portfolio(&self, request: &PortfolioRequest) -> TerminalResult<OptimizationResult> {
        info!(symbols = request.symbols.len(), "Requesting portfolio optimization");

        let result: OptimizationResult = self.post("optimize_portfolio", request).await?;
        if let Some(error) = result.get("error").and_then(|e| e.as_str()) {
            return Err(TerminalError::ServiceError {
                service: SERVICE.to_string(),
                message: error.to_string(),
                status: None,
            });
        }
        Ok(result)
    }

    async fn fetch_prices(&self, symbols: &[Symbol]) -> TerminalResult<PriceTable> {
        let request = PriceRequest {
            symbols: symbols.to_vec(),
        };

        let table: PriceTable = self.post("fetch_prices", &request).await?;
        if table.is_empty() {
            return Err(TerminalError::InvalidResponse("No price data".to_string()));
        }
        Ok(table)
    }
}
