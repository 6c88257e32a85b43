//! Risk terminal controller
//!
//! The RiskTerminal owns everything a session needs: the service clients,
//! the portfolio under construction, the query log and the risk analyzer.
//! It drives both workflows:
//! - Portfolio: search, add/remove positions, remote VaR and optimization
//! - Single security: fetch profile and closes, compute rolling risk locally

use std::sync::Arc;
use tracing::{debug, info, warn};

use riskterm_risk::{RiskAnalyzer, SecurityRiskReport};

use crate::config::TerminalConfig;
use crate::error::{TerminalError, TerminalResult};
use crate::portfolio::{Portfolio, Position};
use crate::providers::{
    FmpClient, HttpRiskBackend, IdentifierResolver, MarketDataProvider, OpenFigiResolver,
    RiskBackend,
};
use crate::query_log::QueryLog;
use crate::search::SecurityQuery;
use crate::types::{OptimizationResult, PriceTableRow, SecurityProfile, Symbol, VarResponse};

/// Rows shown in the portfolio price table
pub const PRICE_TABLE_ROWS: usize = 100;

/// Result of a security search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Profile found; `resolved_from` holds the ISIN when the query was one
    Found {
        profile: SecurityProfile,
        resolved_from: Option<String>,
    },

    /// The provider has no profile for the symbol
    NotFound { symbol: Symbol },

    /// The ISIN did not map to any ticker
    UnresolvedIsin { isin: String },
}

/// Profile plus locally computed risk series for one security
#[derive(Debug, Clone)]
pub struct SecurityAnalysis {
    pub profile: Option<SecurityProfile>,
    pub report: SecurityRiskReport,
}

/// Session controller for the risk terminal
pub struct RiskTerminal {
    market_data: Arc<dyn MarketDataProvider>,
    backend: Arc<dyn RiskBackend>,
    resolver: Arc<dyn IdentifierResolver>,
    analyzer: RiskAnalyzer,
    portfolio: Portfolio,
    query_log: QueryLog,
}

impl RiskTerminal {
    /// Assemble a terminal from explicit collaborators
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        backend: Arc<dyn RiskBackend>,
        resolver: Arc<dyn IdentifierResolver>,
        analyzer: RiskAnalyzer,
        query_log: QueryLog,
    ) -> Self {
        Self {
            market_data,
            backend,
            resolver,
            analyzer,
            portfolio: Portfolio::new(),
            query_log,
        }
    }

    /// Build the HTTP clients and query log described by `config`
    pub fn from_config(config: &TerminalConfig) -> TerminalResult<Self> {
        config.validate()?;

        let query_log = match &config.query_log_path {
            Some(path) => QueryLog::open(path)?,
            None => QueryLog::in_memory(),
        };

        info!(
            market_data = %config.market_data.base_url,
            backend = %config.backend.base_url,
            "Starting risk terminal"
        );

        Ok(Self::new(
            Arc::new(FmpClient::new(config.market_data.clone())?),
            Arc::new(HttpRiskBackend::new(config.backend.clone())?),
            Arc::new(OpenFigiResolver::new(config.resolver.clone())?),
            RiskAnalyzer::new(config.analysis.clone())?,
            query_log,
        ))
    }

    /// Search by ticker or ISIN. Blank input is ignored and returns `None`.
    pub async fn search(&mut self, input: &str) -> TerminalResult<Option<SearchOutcome>> {
        let Some(query) = SecurityQuery::parse(input) else {
            return Ok(None);
        };

        self.query_log.record(input.trim())?;

        let (symbol, resolved_from) = match query {
            SecurityQuery::Ticker(symbol) => (symbol, None),
            SecurityQuery::Isin(isin) => match self.resolver.resolve_isin(&isin).await? {
                Some(symbol) => {
                    info!(isin = %isin, symbol = %symbol, "ISIN resolved");
                    (symbol, Some(isin))
                }
                None => {
                    warn!(isin = %isin, "ISIN not found");
                    return Ok(Some(SearchOutcome::UnresolvedIsin { isin }));
                }
            },
        };

        let outcome = match self.market_data.profile(&symbol).await? {
            Some(profile) => SearchOutcome::Found {
                profile,
                resolved_from,
            },
            None => SearchOutcome::NotFound { symbol },
        };

        Ok(Some(outcome))
    }

    /// Add a position to the portfolio
    pub fn add_position(
        &mut self,
        symbol: Symbol,
        name: impl Into<String>,
        weight: f64,
    ) -> TerminalResult<()> {
        let name = name.into();
        debug!(symbol = %symbol, weight, "Adding position");
        self.portfolio.add(symbol, name, weight)?;

        if self.portfolio.is_over_allocated() {
            warn!(total_weight = self.portfolio.total_weight(), "Total weight exceeds 100%");
        }
        Ok(())
    }

    /// Remove the position at `index`
    pub fn remove_position(&mut self, index: usize) -> TerminalResult<Position> {
        let removed = self.portfolio.remove(index)?;
        debug!(symbol = %removed.symbol, "Removed position");
        Ok(removed)
    }

    /// VaR figures for the current portfolio from the remote backend
    pub async fn calculate_var(&self) -> TerminalResult<VarResponse> {
        let request = self.portfolio.to_request()?;
        self.backend.calculate_var(&request).await
    }

    /// Optimization result for the current portfolio from the remote backend
    pub async fn optimize_portfolio(&self) -> TerminalResult<OptimizationResult> {
        let request = self.portfolio.to_request()?;
        self.backend.optimize_portfolio(&request).await
    }

    /// Newest-first closes for every position, at most 100 dates
    pub async fn portfolio_prices(&self) -> TerminalResult<Vec<PriceTableRow>> {
        if self.portfolio.is_empty() {
            return Err(TerminalError::EmptyPortfolio);
        }

        let symbols = self.portfolio.symbols();
        let table = self.backend.fetch_prices(&symbols).await?;
        Ok(table.recent_rows(&symbols, PRICE_TABLE_ROWS))
    }

    /// Fetch profile and history concurrently, then compute the risk report.
    /// Nothing is computed unless both fetches succeed.
    pub async fn analyze_security(&self, symbol: &Symbol) -> TerminalResult<SecurityAnalysis> {
        let (profile, prices) = tokio::try_join!(
            self.market_data.profile(symbol),
            self.market_data.historical_prices(symbol),
        )?;

        let report = self.analyzer.analyze(&prices)?;

        info!(
            symbol = %symbol,
            observations = prices.len(),
            latest_var = report.latest_var().unwrap_or_default(),
            latest_volatility = report.latest_volatility().unwrap_or_default(),
            "Security analysis complete"
        );

        Ok(SecurityAnalysis { profile, report })
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn query_log(&self) -> &QueryLog {
        &self.query_log
    }

    pub fn analyzer(&self) -> &RiskAnalyzer {
        &self.analyzer
    }
}
