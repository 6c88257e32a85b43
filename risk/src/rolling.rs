//! Rolling historical VaR and rolling volatility
//!
//! Both estimators walk the return series once and, at every index, look at
//! the causal window `returns[max(0, i - window_size + 1)..=i]`:
//! - Historical VaR: negated lower `(1 - confidence)` empirical quantile
//! - Volatility: population standard deviation of the window
//!
//! Windows holding fewer than `min_observations` returns emit `0.0`.

use crate::error::{Result, RiskError};
use crate::returns::{population_std_dev, window_start};
use serde::{Deserialize, Deserializer, Serialize};

/// Value emitted for windows that are too short to estimate anything.
pub const INSUFFICIENT_DATA_SENTINEL: f64 = 0.0;

pub const DEFAULT_WINDOW_SIZE: usize = 20;
pub const DEFAULT_MIN_OBSERVATIONS: usize = 5;
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Absorbs rounding in `1 - confidence` when locating the quantile index
pub const QUANTILE_EPSILON: f64 = 1e-9;

/// Trailing window shared by the VaR and volatility estimators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingWindow {
    window_size: usize,
    min_observations: usize,
}

impl RollingWindow {
    /// Create a window, checking `window_size >= min_observations >= 1`
    pub fn new(window_size: usize, min_observations: usize) -> Result<Self> {
        if min_observations == 0 || window_size < min_observations {
            return Err(RiskError::InvalidWindow {
                window_size,
                min_observations,
            });
        }

        Ok(Self {
            window_size,
            min_observations,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn min_observations(&self) -> usize {
        self.min_observations
    }

    /// The slice of `values` visible at `index`, or `None` when it holds
    /// fewer than `min_observations` elements.
    fn sufficient_window<'a>(&self, values: &'a [f64], index: usize) -> Option<&'a [f64]> {
        let window = &values[window_start(index, self.window_size)..=index];
        (window.len() >= self.min_observations).then_some(window)
    }
}

impl<'de> Deserialize<'de> for RollingWindow {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            window_size: usize,
            min_observations: usize,
        }

        let raw = Raw::deserialize(deserializer)?;
        RollingWindow::new(raw.window_size, raw.min_observations).map_err(serde::de::Error::custom)
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_observations: DEFAULT_MIN_OBSERVATIONS,
        }
    }
}

/// Rolling historical VaR over `returns`.
///
/// For each index the window is sorted ascending and the value at
/// `k = floor(len * (1 - confidence))` is negated, so losses come out as
/// positive numbers. The product is nudged up by [`QUANTILE_EPSILON`] before
/// flooring so that `20 * (1 - 0.90)` lands on 2 rather than 1.
///
/// `confidence` is not checked here; use [`RollingRiskEstimator::new`] when
/// it comes from user input. Out-of-range values saturate instead of
/// panicking: `confidence >= 1` and NaN select the smallest return,
/// `confidence <= 0` the largest.
pub fn rolling_var(returns: &[f64], window: &RollingWindow, confidence: f64) -> Vec<f64> {
    let tail = 1.0 - confidence;
    let mut sorted = Vec::with_capacity(window.window_size);

    (0..returns.len())
        .map(|i| match window.sufficient_window(returns, i) {
            Some(slice) => {
                sorted.clear();
                sorted.extend_from_slice(slice);
                sorted.sort_by(f64::total_cmp);

                // `as usize` saturates negatives and NaN to 0
                let k = ((sorted.len() as f64 * tail + QUANTILE_EPSILON).floor() as usize)
                    .min(sorted.len() - 1);
                -sorted[k]
            }
            None => INSUFFICIENT_DATA_SENTINEL,
        })
        .collect()
}

/// Rolling population standard deviation of `returns`.
pub fn rolling_volatility(returns: &[f64], window: &RollingWindow) -> Vec<f64> {
    (0..returns.len())
        .map(|i| match window.sufficient_window(returns, i) {
            Some(slice) => population_std_dev(slice),
            None => INSUFFICIENT_DATA_SENTINEL,
        })
        .collect()
}

/// Parallel rolling VaR and volatility series, one value per return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingRiskSeries {
    pub var: Vec<f64>,
    pub volatility: Vec<f64>,
}

impl RollingRiskSeries {
    pub fn len(&self) -> usize {
        self.var.len()
    }

    pub fn is_empty(&self) -> bool {
        self.var.is_empty()
    }
}

/// Validated rolling VaR / volatility estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollingRiskEstimator {
    window: RollingWindow,
    confidence: f64,
}

impl RollingRiskEstimator {
    pub fn new(window: RollingWindow, confidence: f64) -> Result<Self> {
        // Negated comparison also rejects NaN
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(RiskError::InvalidConfidenceLevel(confidence));
        }

        Ok(Self { window, confidence })
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn rolling_var(&self, returns: &[f64]) -> Vec<f64> {
        rolling_var(returns, &self.window, self.confidence)
    }

    pub fn rolling_volatility(&self, returns: &[f64]) -> Vec<f64> {
        rolling_volatility(returns, &self.window)
    }

    /// Compute both series in one call
    pub fn estimate(&self, returns: &[f64]) -> RollingRiskSeries {
        RollingRiskSeries {
            var: self.rolling_var(returns),
            volatility: self.rolling_volatility(returns),
        }
    }
}

impl<'de> Deserialize<'de> for RollingRiskEstimator {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            window: RollingWindow,
            confidence: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        RollingRiskEstimator::new(raw.window, raw.confidence).map_err(serde::de::Error::custom)
    }
}

impl Default for RollingRiskEstimator {
    fn default() -> Self {
        Self {
            window: RollingWindow::default(),
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_returns() -> Vec<f64> {
        vec![0.01, -0.02, 0.03, -0.01, 0.02]
    }

    #[test]
    fn test_window_validation() {
        assert!(RollingWindow::new(20, 5).is_ok());
        assert!(RollingWindow::new(5, 5).is_ok());
        assert!(RollingWindow::new(1, 1).is_ok());
        assert!(RollingWindow::new(4, 5).is_err());
        assert!(RollingWindow::new(20, 0).is_err());
        assert!(RollingWindow::new(0, 0).is_err());
    }

    #[test]
    fn test_confidence_validation() {
        let window = RollingWindow::default();
        assert!(RollingRiskEstimator::new(window, 0.95).is_ok());
        assert!(RollingRiskEstimator::new(window, 0.0).is_err());
        assert!(RollingRiskEstimator::new(window, 1.0).is_err());
        assert!(RollingRiskEstimator::new(window, -0.5).is_err());
        assert!(matches!(
            RollingRiskEstimator::new(window, f64::NAN),
            Err(RiskError::InvalidConfidenceLevel(_))
        ));
    }

    #[test]
    fn test_rolling_var_first_full_window() {
        let var = rolling_var(&sample_returns(), &RollingWindow::default(), 0.95);

        assert_eq!(var.len(), 5);
        assert_eq!(&var[..4], &[0.0, 0.0, 0.0, 0.0]);
        // sorted [-0.02, -0.01, 0.01, 0.02, 0.03], k = floor(5 * 0.05) = 0
        assert_eq!(var[4], 0.02);
    }

    #[test]
    fn test_rolling_var_trailing_window_drops_old_returns() {
        // The big loss at index 0 leaves the window once it slides past it
        let returns = vec![-0.10, 0.01, 0.02, 0.01, 0.03, 0.02, 0.01];
        let window = RollingWindow::new(5, 5).unwrap();
        let var = rolling_var(&returns, &window, 0.95);

        assert_eq!(var[4], 0.10);
        assert_eq!(var[5], -0.01);
        assert_eq!(var[6], -0.01);
    }

    #[test]
    fn test_rolling_var_quantile_index_grows_with_window() {
        // 20 returns, k = floor(20 * 0.05) = 1 picks the second smallest
        let returns: Vec<f64> = (0..20).map(|i| (i as f64 - 10.0) / 100.0).collect();
        let var = rolling_var(&returns, &RollingWindow::default(), 0.95);

        assert_relative_eq!(var[19], 0.09, epsilon = 1e-12);

        // 99% confidence keeps k = 0
        let var_99 = rolling_var(&returns, &RollingWindow::default(), 0.99);
        assert_relative_eq!(var_99[19], 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_var_quantile_index_at_90_percent() {
        // 1 - 0.90 is just under 0.1 in floating point; k must still be 2
        let returns: Vec<f64> = (0..20).map(|i| (i as f64 - 10.0) / 100.0).collect();
        let var = rolling_var(&returns, &RollingWindow::default(), 0.90);
        assert_relative_eq!(var[19], 0.08, epsilon = 1e-12);

        // 5 returns at 80%: k = floor(5 * 0.2) = 1
        let var_80 = rolling_var(&sample_returns(), &RollingWindow::default(), 0.80);
        assert_relative_eq!(var_80[4], 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_var_out_of_range_confidence_saturates() {
        let returns = sample_returns();
        let window = RollingWindow::default();

        assert_eq!(rolling_var(&returns, &window, 1.5)[4], 0.02);
        assert_eq!(rolling_var(&returns, &window, f64::NAN)[4], 0.02);
        assert_eq!(rolling_var(&returns, &window, -1.0)[4], -0.03);
    }

    #[test]
    fn test_deserialize_validates_window() {
        let window: RollingWindow =
            serde_json::from_str(r#"{"window_size":10,"min_observations":3}"#).unwrap();
        assert_eq!(window, RollingWindow::new(10, 3).unwrap());

        assert!(serde_json::from_str::<RollingWindow>(r#"{"window_size":0,"min_observations":0}"#).is_err());
        assert!(serde_json::from_str::<RollingWindow>(r#"{"window_size":4,"min_observations":5}"#).is_err());
    }

    #[test]
    fn test_deserialize_validates_estimator() {
        let estimator = RollingRiskEstimator::default();
        let json = serde_json::to_string(&estimator).unwrap();
        assert_eq!(serde_json::from_str::<RollingRiskEstimator>(&json).unwrap(), estimator);

        let bad = r#"{"window":{"window_size":20,"min_observations":5},"confidence":7.0}"#;
        assert!(serde_json::from_str::<RollingRiskEstimator>(bad).is_err());
    }

    #[test]
    fn test_rolling_volatility() {
        let returns = sample_returns();
        let vol = rolling_volatility(&returns, &RollingWindow::default());

        assert_eq!(vol.len(), 5);
        assert_eq!(&vol[..4], &[0.0, 0.0, 0.0, 0.0]);

        // mean = 0.006, squared deviations sum to 0.00172, / 5 = 0.000344
        assert_relative_eq!(vol[4], 0.000344_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_constant_returns() {
        let returns = vec![-0.25; 8];
        let estimator = RollingRiskEstimator::default();
        let series = estimator.estimate(&returns);

        for i in 4..8 {
            assert_eq!(series.var[i], 0.25);
            assert_eq!(series.volatility[i], 0.0);
        }
    }

    #[test]
    fn test_empty_returns() {
        let series = RollingRiskEstimator::default().estimate(&[]);
        assert!(series.is_empty());
        assert!(series.volatility.is_empty());
    }

    #[test]
    fn test_non_finite_values_propagate() {
        let returns = vec![0.01, f64::NAN, 0.02, 0.03, -0.01];
        let vol = rolling_volatility(&returns, &RollingWindow::default());
        assert!(vol[4].is_nan());
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let returns: Vec<f64> = (0..252).map(|i| ((i as f64) * 0.37).sin() * 0.02).collect();
        let estimator = RollingRiskEstimator::default();

        assert_eq!(estimator.estimate(&returns), estimator.estimate(&returns));
    }
}
