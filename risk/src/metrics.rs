//! Performance ratios shown next to the rolling risk charts
//!
//! - Sharpe Ratio: (Mean Return - Daily Risk-Free Rate) / Volatility, annualized
//! - Sortino Ratio: same excess return over the dispersion of losing days
//!
//! Dispersion is the population standard deviation throughout. A zero
//! denominator yields a ratio of `0.0` rather than an error.

use crate::error::{Result, RiskError};
use crate::returns::{mean, population_std_dev};
use serde::{Deserialize, Serialize};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.01;

/// Performance ratio calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Daily simple returns
    returns: Vec<f64>,

    /// Risk-free rate (annualized)
    risk_free_rate: f64,
}

impl PerformanceMetrics {
    pub fn new(returns: Vec<f64>, risk_free_rate: f64) -> Self {
        Self {
            returns,
            risk_free_rate,
        }
    }

    /// Annualized Sharpe Ratio
    ///
    /// Sharpe = (Mean Return - rf / 252) / σ × √252
    pub fn sharpe_ratio(&self) -> Result<f64> {
        self.ensure_returns()?;

        let std_dev = population_std_dev(&self.returns);
        Ok(self.annualized_excess_ratio(std_dev))
    }

    /// Annualized Sortino Ratio
    ///
    /// The denominator is the standard deviation of the strictly negative
    /// returns around their own mean.
    pub fn sortino_ratio(&self) -> Result<f64> {
        self.ensure_returns()?;

        let downside: Vec<f64> = self.returns.iter().copied().filter(|r| *r < 0.0).collect();
        let downside_std = if downside.is_empty() {
            0.0
        } else {
            population_std_dev(&downside)
        };

        Ok(self.annualized_excess_ratio(downside_std))
    }

    fn annualized_excess_ratio(&self, dispersion: f64) -> f64 {
        if dispersion == 0.0 {
            return 0.0;
        }

        let daily_rf = self.risk_free_rate / TRADING_DAYS_PER_YEAR;
        let daily_ratio = (mean(&self.returns) - daily_rf) / dispersion;
        daily_ratio * TRADING_DAYS_PER_YEAR.sqrt()
    }

    fn ensure_returns(&self) -> Result<()> {
        if self.returns.is_empty() {
            return Err(RiskError::InsufficientData("No returns data".to_string()));
        }
        Ok(())
    }
}
