use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Buy-signal cutoff, held as a fraction in `[0, 1]`.
///
/// Front-ends that work in percent convert with [`ConfidenceThreshold::from_percent`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceThreshold(f64);

impl ConfidenceThreshold {
    pub fn from_fraction(value: f64) -> Result<Self, AnalysisError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(AnalysisError::InvalidParameter(format!(
                "confidence threshold {} outside 0-1",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn from_percent(value: f64) -> Result<Self, AnalysisError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(AnalysisError::InvalidParameter(format!(
                "confidence threshold {}% outside 0-100",
                value
            )));
        }
        Ok(Self(value / 100.0))
    }

    /// Accept either scale: values above 1 are read as percent.
    pub fn from_either(value: f64) -> Result<Self, AnalysisError> {
        if value > 1.0 {
            Self::from_percent(value)
        } else {
            Self::from_fraction(value)
        }
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// `true` when `probability` (a fraction) meets the cutoff.
    pub fn is_met_by(&self, probability: f64) -> bool {
        probability >= self.0
    }
}

impl TryFrom<f64> for ConfidenceThreshold {
    type Error = AnalysisError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_fraction(value)
    }
}

impl From<ConfidenceThreshold> for f64 {
    fn from(value: ConfidenceThreshold) -> Self {
        value.0
    }
}

/// Price range handed to a probability estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    /// The last bucket is closed on the right and contains `upper`.
    pub is_last: bool,
}

impl PriceBucket {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && (price < self.upper || (self.is_last && price <= self.upper))
    }
}

/// One price interval with its estimated buy probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Percent in `[0, 100]`.
    pub probability: f64,
    pub is_buy_signal: bool,
    pub sample_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_profit: Option<f64>,
}

impl Interval {
    pub fn probability_fraction(&self) -> f64 {
        self.probability / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_scales() {
        let fraction = ConfidenceThreshold::from_fraction(0.6).unwrap();
        let percent = ConfidenceThreshold::from_percent(60.0).unwrap();
        assert_eq!(fraction.fraction(), 0.6);
        assert!((percent.fraction() - 0.6).abs() < 1e-12);
        assert!((fraction.percent() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_rejects_out_of_range() {
        assert!(ConfidenceThreshold::from_fraction(1.5).is_err());
        assert!(ConfidenceThreshold::from_fraction(-0.1).is_err());
        assert!(ConfidenceThreshold::from_percent(101.0).is_err());
        assert!(ConfidenceThreshold::from_fraction(f64::NAN).is_err());
    }

    #[test]
    fn test_threshold_from_either() {
        assert_eq!(ConfidenceThreshold::from_either(0.7).unwrap().fraction(), 0.7);
        assert_eq!(ConfidenceThreshold::from_either(70.0).unwrap().fraction(), 0.7);
        assert_eq!(ConfidenceThreshold::from_either(1.0).unwrap().fraction(), 1.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let threshold = ConfidenceThreshold::from_fraction(0.5).unwrap();
        assert!(threshold.is_met_by(0.5));
        assert!(!threshold.is_met_by(0.4999));
    }

    #[test]
    fn test_bucket_contains() {
        let inner = PriceBucket {
            index: 0,
            lower: 10.0,
            upper: 20.0,
            is_last: false,
        };
        assert!(inner.contains(10.0));
        assert!(!inner.contains(20.0));

        let last = PriceBucket { is_last: true, ..inner };
        assert!(last.contains(20.0));
        assert!(!last.contains(20.5));
    }
}
