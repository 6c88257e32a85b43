//! # riskterm-risk: Rolling Risk Metrics over Daily Prices
//!
//! This library computes the locally-owned risk figures of the risk terminal
//! from a single security's closing prices.
//!
//! ## Core Components
//!
//! - **RollingRiskEstimator**: rolling historical VaR and rolling volatility
//!   over a causal trailing window, with a zero sentinel for short windows
//! - **MovingAverageOverlay**: short/long simple moving averages, `None` until
//!   a window fills
//! - **Alignment**: matching return-indexed series back onto price dates
//! - **PerformanceMetrics**: annualized Sharpe and Sortino ratios
//! - **RiskAnalyzer**: one call from a `PriceSeries` to a chart-ready report
//!
//! ## Example Usage
//!
//! ```rust
//! use riskterm_risk::{RollingRiskEstimator, simple_moving_average};
//!
//! let returns = [0.01, -0.02, 0.03, -0.01, 0.02];
//! let estimator = RollingRiskEstimator::default(); // 20-day window, 5 obs, 95%
//!
//! let series = estimator.estimate(&returns);
//! assert_eq!(series.var, vec![0.0, 0.0, 0.0, 0.0, 0.02]);
//!
//! let sma = simple_moving_average(&[10.0, 11.0, 12.0], 3);
//! assert_eq!(sma[0], None);
//! assert_eq!(sma[2], Some(11.0));
//! ```

mod align;
mod analysis;
mod config;
mod error;
mod metrics;
mod moving_average;
mod returns;
mod rolling;
mod series;

pub use align::{align_to_dates, AlignedSeries, AlignmentConvention};
pub use analysis::{RiskAnalyzer, SecurityRiskReport};
pub use config::AnalysisConfig;
pub use error::{Result, RiskError};
pub use metrics::{PerformanceMetrics, DEFAULT_RISK_FREE_RATE, TRADING_DAYS_PER_YEAR};
pub use moving_average::{
    simple_moving_average, MovingAverageOverlay, MovingAverages, DEFAULT_LONG_WINDOW,
    DEFAULT_SHORT_WINDOW,
};
pub use returns::{mean, population_std_dev, simple_returns};
pub use rolling::{
    rolling_var, rolling_volatility, RollingRiskEstimator, RollingRiskSeries, RollingWindow,
    DEFAULT_CONFIDENCE, DEFAULT_MIN_OBSERVATIONS, DEFAULT_WINDOW_SIZE,
    INSUFFICIENT_DATA_SENTINEL, QUANTILE_EPSILON,
};
pub use series::{PricePoint, PriceSeries};
