//! Simple moving-average overlays for price charts
//!
//! Unlike the rolling risk series, indices without a full window carry
//! `None` rather than a zero so an overlay renders as a gap.

use crate::error::{Result, RiskError};
use crate::returns::mean;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SHORT_WINDOW: usize = 20;
pub const DEFAULT_LONG_WINDOW: usize = 50;

/// Simple moving average of `prices` over `window_size` observations.
///
/// Index `i` holds the mean of `prices[i + 1 - window_size..=i]`, or `None`
/// while `i < window_size - 1`. A zero window yields no values at all.
pub fn simple_moving_average(prices: &[f64], window_size: usize) -> Vec<Option<f64>> {
    if window_size == 0 || prices.len() < window_size {
        return vec![None; prices.len()];
    }

    let mut averages = vec![None; window_size - 1];
    averages.extend(prices.windows(window_size).map(|w| Some(mean(w))));
    averages
}

/// Short and long moving averages over the same prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub short: Vec<Option<f64>>,
    pub long: Vec<Option<f64>>,
}

/// Pair of SMA windows drawn over a price chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverageOverlay {
    short_window: usize,
    long_window: usize,
}

impl MovingAverageOverlay {
    pub fn new(short_window: usize, long_window: usize) -> Result<Self> {
        for window in [short_window, long_window] {
            if window == 0 {
                return Err(RiskError::InvalidMovingAverageWindow(window));
            }
        }

        Ok(Self {
            short_window,
            long_window,
        })
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }

    pub fn compute(&self, prices: &[f64]) -> MovingAverages {
        MovingAverages {
            short: simple_moving_average(prices, self.short_window),
            long: simple_moving_average(prices, self.long_window),
        }
    }
}

impl Default for MovingAverageOverlay {
    fn default() -> Self {
        Self {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
        }
    }
}
