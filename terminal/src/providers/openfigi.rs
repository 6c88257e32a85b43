//! OpenFIGI identifier mapping
//!
//! Documentation: https://www.openfigi.com/api

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{TerminalError, TerminalResult};
use crate::providers::{endpoint, ensure_success, IdentifierResolver};
use crate::types::Symbol;

const SERVICE: &str = "OpenFIGI";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MappingJob<'a> {
    id_type: &'static str,
    id_value: &'a str,
}

#[derive(Debug, Deserialize)]
struct MappingResult {
    #[serde(default)]
    data: Vec<FigiRecord>,
}

#[derive(Debug, Deserialize)]
struct FigiRecord {
    #[serde(default)]
    ticker: Option<String>,
}

/// OpenFIGI `/mapping` client
pub struct OpenFigiResolver {
    config: ResolverConfig,
    client: Client,
}

impl OpenFigiResolver {
    pub fn new(config: ResolverConfig) -> TerminalResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TerminalError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl IdentifierResolver for OpenFigiResolver {
    async fn resolve_isin(&self, isin: &str) -> TerminalResult<Option<Symbol>> {
        let url = endpoint(&self.config.base_url, "mapping")?;
        debug!(isin = %isin, "Resolving ISIN");

        let jobs = [MappingJob {
            id_type: "ID_ISIN",
            id_value: isin,
        }];

        let mut request = self.client.post(url).json(&jobs);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-OPENFIGI-APIKEY", key);
        }

        let response = ensure_success(SERVICE, request.send().await?).await?;
        let results: Vec<MappingResult> = response.json().await?;

        // Unmatched identifiers come back as `{"warning": ...}` with no data
        let ticker = results
            .into_iter()
            .next()
            .and_then(|result| result.data.into_iter().find_map(|record| record.ticker))
            .map(Symbol::new);

        Ok(ticker)
    }
}
