//! Terminal configuration
//!
//! Endpoints, credentials and analysis parameters, loaded from YAML with
//! environment overrides. The market-data API key is never stored in code;
//! set `FMP_API_KEY` (a `.env` file works too) or put it in the config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use riskterm_risk::AnalysisConfig;

use crate::error::{TerminalError, TerminalResult};

/// Full terminal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub market_data: MarketDataConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Rolling risk and overlay parameters for single-security charts
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Where the query log is persisted; in-memory when absent
    #[serde(default)]
    pub query_log_path: Option<PathBuf>,
}

/// Market-data provider (FinancialModelingPrep) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// API root, e.g. `https://financialmodelingprep.com/api`
    #[serde(default = "default_market_data_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Number of most recent daily closes kept per security
    #[serde(default = "default_history_days")]
    pub history_days: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Remote VaR / optimization backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// ISIN resolution (OpenFIGI) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_resolver_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl MarketDataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_data_url(),
            api_key: None,
            history_days: default_history_days(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: default_resolver_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TerminalConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> TerminalResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> TerminalResult<Self> {
        let config: TerminalConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FMP_API_KEY`, `RISK_BACKEND_URL` and `OPENFIGI_API_KEY`
    /// from the environment (after loading `.env`, if present)
    pub fn with_env_overrides(mut self) -> Self {
        dotenv::dotenv().ok();

        if let Ok(key) = std::env::var("FMP_API_KEY") {
            self.market_data.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("RISK_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(key) = std::env::var("OPENFIGI_API_KEY") {
            self.resolver.api_key = Some(key);
        }

        self
    }

    /// Validate endpoints and analysis parameters
    pub fn validate(&self) -> TerminalResult<()> {
        for url in [
            &self.market_data.base_url,
            &self.backend.base_url,
            &self.resolver.base_url,
        ] {
            url::Url::parse(url)?;
        }

        if self.market_data.history_days < 2 {
            return Err(TerminalError::ConfigError(format!(
                "history_days must be at least 2, got {}",
                self.market_data.history_days
            )));
        }

        self.analysis.validate()?;
        Ok(())
    }
}

// Default value functions
fn default_market_data_url() -> String {
    "https://financialmodelingprep.com/api".to_string()
}

fn default_backend_url() -> String {
    "https://financial-terminal.onrender.com".to_string()
}

fn default_resolver_url() -> String {
    "https://api.openfigi.com/v3".to_string()
}

fn default_history_days() -> usize {
    252
}

fn default_timeout_secs() -> u64 {
    30
}
