//! Single-security risk report
//!
//! Turns one closing-price series into everything the security chart shows:
//! the closes, rolling VaR and volatility aligned to dates, the two moving
//! average overlays and the annualized Sharpe/Sortino ratios.

use crate::align::{align_to_dates, AlignedSeries};
use crate::config::AnalysisConfig;
use crate::error::{Result, RiskError};
use crate::metrics::PerformanceMetrics;
use crate::moving_average::{MovingAverageOverlay, MovingAverages};
use crate::rolling::RollingRiskEstimator;
use crate::series::PriceSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chart-ready risk series for one security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRiskReport {
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub rolling_var: AlignedSeries,
    pub rolling_volatility: AlignedSeries,
    /// Aligned with `dates`; `None` until the window fills
    pub moving_averages: MovingAverages,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub confidence: f64,
}

impl SecurityRiskReport {
    /// Most recent rolling VaR value
    pub fn latest_var(&self) -> Option<f64> {
        self.rolling_var.values.last().copied()
    }

    /// Most recent rolling volatility value
    pub fn latest_volatility(&self) -> Option<f64> {
        self.rolling_volatility.values.last().copied()
    }
}

/// Builds [`SecurityRiskReport`]s from a validated configuration
#[derive(Debug, Clone)]
pub struct RiskAnalyzer {
    config: AnalysisConfig,
    estimator: RollingRiskEstimator,
    overlay: MovingAverageOverlay,
}

impl RiskAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let estimator = config.rolling_estimator()?;
        let overlay = config.moving_average_overlay()?;

        Ok(Self {
            config,
            estimator,
            overlay,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a price series holding at least two closes
    pub fn analyze(&self, prices: &PriceSeries) -> Result<SecurityRiskReport> {
        if prices.len() < 2 {
            return Err(RiskError::InsufficientData(format!(
                "Need at least 2 prices to derive returns, got {}",
                prices.len()
            )));
        }

        let dates = prices.dates();
        let closes = prices.closes();
        let returns = prices.returns();

        debug!(
            prices = closes.len(),
            window_size = self.estimator.window().window_size(),
            confidence = self.estimator.confidence(),
            "Computing rolling risk series"
        );

        let rolling = self.estimator.estimate(&returns);
        let rolling_var = align_to_dates(&dates, &rolling.var, self.config.alignment)?;
        let rolling_volatility = align_to_dates(&dates, &rolling.volatility, self.config.alignment)?;

        let moving_averages = self.overlay.compute(&closes);

        let metrics = PerformanceMetrics::new(returns, self.config.risk_free_rate);
        let sharpe_ratio = metrics.sharpe_ratio()?;
        let sortino_ratio = metrics.sortino_ratio()?;

        Ok(SecurityRiskReport {
            dates,
            closes,
            rolling_var,
            rolling_volatility,
            moving_averages,
            sharpe_ratio,
            sortino_ratio,
            confidence: self.estimator.confidence(),
        })
    }
}

impl Default for RiskAnalyzer {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            estimator: RollingRiskEstimator::default(),
            overlay: MovingAverageOverlay::default(),
        }
    }
}
