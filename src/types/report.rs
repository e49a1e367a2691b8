use serde::{Deserialize, Serialize};

use super::{AnalysisResult, ConfidenceThreshold, Interval, SeriesOrigin, TradingRule};
use crate::error::AnalysisError;

/// Allowed number of price intervals.
pub const MIN_INTERVALS: usize = 2;
pub const MAX_INTERVALS: usize = 10;

/// Parameters of one partition analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisParams {
    /// Trading days between buy and sell.
    pub holding_period: usize,
    /// Number of price intervals (2-10).
    pub intervals: usize,
    /// Required profit as a fraction of the interval width.
    pub target_profit_ratio: f64,
    pub confidence: ConfidenceThreshold,
    /// Trailing window of the volume analysis.
    pub volume_days: usize,
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        validate_intervals(self.intervals)?;
        if self.holding_period == 0 {
            return Err(AnalysisError::InvalidParameter(
                "holding period must be at least 1 day".to_string(),
            ));
        }
        if !self.target_profit_ratio.is_finite() || self.target_profit_ratio < 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "target profit ratio {} must be a non-negative number",
                self.target_profit_ratio
            )));
        }
        if self.volume_days == 0 {
            return Err(AnalysisError::InvalidParameter(
                "volume window must be at least 1 day".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn validate_intervals(count: usize) -> Result<(), AnalysisError> {
    if !(MIN_INTERVALS..=MAX_INTERVALS).contains(&count) {
        return Err(AnalysisError::InvalidParameter(format!(
            "intervals {} outside {}-{}",
            count, MIN_INTERVALS, MAX_INTERVALS
        )));
    }
    Ok(())
}

/// Best parameter set found by the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutcome {
    pub params: AnalysisParams,
    pub fitness: f64,
    pub generations: usize,
}

/// Everything one analysis request produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub symbol: String,
    pub origin: SeriesOrigin,
    pub params: AnalysisParams,
    pub samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_price: Option<f64>,
    pub technical: AnalysisResult,
    pub volume: AnalysisResult,
    pub intervals: Vec<Interval>,
    pub rules: Vec<TradingRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationOutcome>,
    pub timestamp: i64,
}

impl AnalysisReport {
    /// Report for a run whose series could not be analyzed.
    pub fn empty(symbol: impl Into<String>, origin: SeriesOrigin, params: AnalysisParams) -> Self {
        Self {
            symbol: symbol.into(),
            origin,
            params,
            samples: 0,
            latest_price: None,
            technical: AnalysisResult::new(),
            volume: AnalysisResult::new(),
            intervals: Vec::new(),
            rules: Vec::new(),
            optimization: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AnalysisParams {
        AnalysisParams {
            holding_period: 10,
            intervals: 5,
            target_profit_ratio: 0.8,
            confidence: ConfidenceThreshold::from_fraction(0.6).unwrap(),
            volume_days: 5,
        }
    }

    #[test]
    fn test_params_validate() {
        assert!(params().validate().is_ok());
        assert!(AnalysisParams { intervals: 1, ..params() }.validate().is_err());
        assert!(AnalysisParams { intervals: 11, ..params() }.validate().is_err());
        assert!(AnalysisParams { holding_period: 0, ..params() }.validate().is_err());
        assert!(AnalysisParams { volume_days: 0, ..params() }.validate().is_err());
        assert!(AnalysisParams { target_profit_ratio: f64::NAN, ..params() }.validate().is_err());
    }

    #[test]
    fn test_interval_bounds_inclusive() {
        assert!(validate_intervals(2).is_ok());
        assert!(validate_intervals(10).is_ok());
    }

    #[test]
    fn test_empty_report() {
        let report = AnalysisReport::empty("2330", SeriesOrigin::Live, params());
        assert_eq!(report.samples, 0);
        assert!(report.intervals.is_empty());
        assert!(report.technical.is_empty());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("latestPrice").is_none());
        assert_eq!(json["params"]["confidence"], 0.6);
    }
}
