//! Analysis configuration
//!
//! Loaded from YAML or JSON; every field has a default matching the daily
//! charting setup (20-day risk window, 5-observation floor, 95% confidence,
//! 20/50-day moving averages, 1% annual risk-free rate).

use crate::align::AlignmentConvention;
use crate::error::{Result, RiskError};
use crate::metrics::DEFAULT_RISK_FREE_RATE;
use crate::moving_average::{MovingAverageOverlay, DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW};
use crate::rolling::{
    RollingRiskEstimator, RollingWindow, DEFAULT_CONFIDENCE, DEFAULT_MIN_OBSERVATIONS,
    DEFAULT_WINDOW_SIZE,
};
use serde::{Deserialize, Serialize};

/// Parameters for a single-security risk analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Trailing window for rolling VaR and volatility
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Windows shorter than this emit the zero sentinel
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,

    /// VaR confidence level, strictly between 0 and 1
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    #[serde(default = "default_short_ma_window")]
    pub short_ma_window: usize,

    #[serde(default = "default_long_ma_window")]
    pub long_ma_window: usize,

    /// Annual risk-free rate used by the Sharpe and Sortino ratios
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    #[serde(default)]
    pub alignment: AlignmentConvention,
}

impl AnalysisConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.rolling_estimator()?;
        self.moving_average_overlay()?;

        if !self.risk_free_rate.is_finite() {
            return Err(RiskError::InvalidParameter(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }

        Ok(())
    }

    pub fn rolling_window(&self) -> Result<RollingWindow> {
        RollingWindow::new(self.window_size, self.min_observations)
    }

    pub fn rolling_estimator(&self) -> Result<RollingRiskEstimator> {
        RollingRiskEstimator::new(self.rolling_window()?, self.confidence)
    }

    pub fn moving_average_overlay(&self) -> Result<MovingAverageOverlay> {
        MovingAverageOverlay::new(self.short_ma_window, self.long_ma_window)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            min_observations: default_min_observations(),
            confidence: default_confidence(),
            short_ma_window: default_short_ma_window(),
            long_ma_window: default_long_ma_window(),
            risk_free_rate: default_risk_free_rate(),
            alignment: AlignmentConvention::default(),
        }
    }
}

// Default value functions
fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_min_observations() -> usize {
    DEFAULT_MIN_OBSERVATIONS
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

fn default_short_ma_window() -> usize {
    DEFAULT_SHORT_WINDOW
}

fn default_long_ma_window() -> usize {
    DEFAULT_LONG_WINDOW
}

fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}
