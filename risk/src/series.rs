//! Dated closing-price series

use crate::error::{Result, RiskError};
use crate::returns::simple_returns;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Chronologically ascending closes with unique dates and positive prices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points that are already in ascending date order
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(RiskError::InvalidSeries(format!(
                    "close on {} must be positive and finite, got {}",
                    point.date, point.close
                )));
            }
        }

        if let Some(pair) = points.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(RiskError::InvalidSeries(format!(
                "dates must be strictly ascending: {} is followed by {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { points })
    }

    /// Build a series from points in any order (market data arrives newest first)
    pub fn from_unordered(mut points: Vec<PricePoint>) -> Result<Self> {
        points.sort_by_key(|p| p.date);
        Self::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Simple returns between consecutive closes
    pub fn returns(&self) -> Vec<f64> {
        simple_returns(&self.closes())
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            points: Vec<PricePoint>,
        }

        let raw = Raw::deserialize(deserializer)?;
        PriceSeries::new(raw.points).map_err(serde::de::Error::custom)
    }
}
