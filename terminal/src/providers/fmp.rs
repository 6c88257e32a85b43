//! FinancialModelingPrep market-data client
//!
//! Profiles come from `/v4/profile/{symbol}`, daily closes from
//! `/v3/historical-price-full/{symbol}?serietype=line`. Documentation:
//! https://site.financialmodelingprep.com/developer/docs

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use riskterm_risk::{PricePoint, PriceSeries};

use crate::config::MarketDataConfig;
use crate::error::{TerminalError, TerminalResult};
use crate::providers::{endpoint, ensure_success, MarketDataProvider};
use crate::types::{HistoricalPriceResponse, SecurityProfile, Symbol};

const SERVICE: &str = "market data";

/// FinancialModelingPrep client
pub struct FmpClient {
    config: MarketDataConfig,
    client: Client,
}

impl FmpClient {
    pub fn new(config: MarketDataConfig) -> TerminalResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TerminalError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn api_key(&self) -> TerminalResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| TerminalError::ConfigError("FMP_API_KEY is not configured".to_string()))
    }

    /// Keep the newest `history_days` bars and order them chronologically
    fn to_price_series(&self, symbol: &Symbol, response: HistoricalPriceResponse) -> TerminalResult<PriceSeries> {
        let mut bars = response.historical;
        bars.sort_by(|a, b| b.date.cmp(&a.date));
        bars.truncate(self.config.history_days);

        if bars.len() < self.config.history_days {
            warn!(
                symbol = %symbol,
                available = bars.len(),
                requested = self.config.history_days,
                "Short price history"
            );
        }

        let points: Vec<PricePoint> = bars.into_iter().map(PricePoint::from).collect();
        Ok(PriceSeries::from_unordered(points)?)
    }
}

#[async_trait]
impl MarketDataProvider for FmpClient {
    async fn profile(&self, symbol: &Symbol) -> TerminalResult<Option<SecurityProfile>> {
        let url = endpoint(&self.config.base_url, &format!("v4/profile/{}", symbol))?;
        debug!(symbol = %symbol, "Fetching profile");

        let response = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key()?)])
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        let profiles: Vec<SecurityProfile> = response.json().await?;
        Ok(profiles.into_iter().next())
    }

    async fn historical_prices(&self, symbol: &Symbol) -> TerminalResult<PriceSeries> {
        let url = endpoint(
            &self.config.base_url,
            &format!("v3/historical-price-full/{}", symbol),
        )?;
        debug!(symbol = %symbol, "Fetching historical prices");

        let response = self
            .client
            .get(url)
            .query(&[("serietype", "line"), ("apikey", self.api_key()?)])
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        // An unknown symbol comes back as `{}`
        let history: HistoricalPriceResponse = response.json().await?;
        if history.historical.is_empty() {
            return Err(TerminalError::SymbolNotFound(symbol.to_string()));
        }

        self.to_price_series(symbol, history)
    }
}
