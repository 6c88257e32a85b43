//! Aligning return-indexed series back onto price dates
//!
//! A return series is one element shorter than the prices it came from, so
//! a series computed over returns has to either gain a leading value or lose
//! the first date before it can be charted against the closes.

use crate::error::{Result, RiskError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a return-indexed series is matched to price dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentConvention {
    /// Prepend `0.0` for the first date, which has no prior return
    #[default]
    PrependZero,

    /// Leave the values untouched and start at the second date
    DropFirstDate,
}

/// Values paired one-to-one with dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl AlignedSeries {
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points().last()
    }
}

/// Align `values` (one per return) with `dates` (one per price).
pub fn align_to_dates(
    dates: &[NaiveDate],
    values: &[f64],
    convention: AlignmentConvention,
) -> Result<AlignedSeries> {
    if values.len() + 1 != dates.len() {
        return Err(RiskError::LengthMismatch {
            values: values.len(),
            dates: dates.len(),
        });
    }

    let aligned = match convention {
        AlignmentConvention::PrependZero => {
            let mut padded = Vec::with_capacity(dates.len());
            padded.push(0.0);
            padded.extend_from_slice(values);
            AlignedSeries {
                dates: dates.to_vec(),
                values: padded,
            }
        }
        AlignmentConvention::DropFirstDate => AlignedSeries {
            dates: dates[1..].to_vec(),
            values: values.to_vec(),
        },
    };

    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: u32) -> Vec<NaiveDate> {
        (1..=n)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect()
    }

    #[test]
    fn test_prepend_zero() {
        let aligned = align_to_dates(&dates(3), &[0.5, 0.7], AlignmentConvention::PrependZero).unwrap();

        assert_eq!(aligned.dates.len(), 3);
        assert_eq!(aligned.values, vec![0.0, 0.5, 0.7]);
        assert_eq!(aligned.last().unwrap().1, 0.7);
    }

    #[test]
    fn test_drop_first_date() {
        let d = dates(3);
        let aligned = align_to_dates(&d, &[0.5, 0.7], AlignmentConvention::DropFirstDate).unwrap();

        assert_eq!(aligned.dates, d[1..].to_vec());
        assert_eq!(aligned.values, vec![0.5, 0.7]);
    }

    #[test]
    fn test_length_mismatch() {
        let result = align_to_dates(&dates(3), &[0.5, 0.7, 0.9], AlignmentConvention::PrependZero);
        assert!(matches!(
            result,
            Err(RiskError::LengthMismatch { values: 3, dates: 3 })
        ));
    }

    #[test]
    fn test_default_convention_deserializes() {
        assert_eq!(AlignmentConvention::default(), AlignmentConvention::PrependZero);
        let parsed: AlignmentConvention = serde_yaml::from_str("drop_first_date").unwrap();
        assert_eq!(parsed, AlignmentConvention::DropFirstDate);
    }
}
