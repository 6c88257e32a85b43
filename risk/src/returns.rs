//! Return derivation and the small array statistics shared by the estimators

use statrs::statistics::Statistics;

/// Simple periodic returns: `r[i] = (p[i+1] - p[i]) / p[i]`.
///
/// The result is one element shorter than `prices`, and empty when fewer
/// than two prices are supplied.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Population standard deviation (divides by `n`, not `n - 1`).
/// NaN for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    values.iter().population_std_dev()
}

/// Start index of the causal window of `window_size` elements ending at `index`.
pub(crate) fn window_start(index: usize, window_size: usize) -> usize {
    (index + 1).saturating_sub(window_size)
}
