use serde::{Deserialize, Serialize};

/// MACD line, signal line and histogram, index-aligned with the source prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdSeries {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Indicators derived from one series.
///
/// Every vector has the length of the source prices. `None` marks positions
/// where the lookback window is not yet full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub ma5: Vec<Option<f64>>,
    pub ma20: Vec<Option<f64>>,
    pub rsi14: Vec<Option<f64>>,
    pub macd: MacdSeries,
}

/// Last defined entry of an indicator column.
pub fn latest(values: &[Option<f64>]) -> Option<f64> {
    values.iter().rev().find_map(|v| *v)
}

impl IndicatorSet {
    pub fn latest_ma5(&self) -> Option<f64> {
        latest(&self.ma5)
    }

    pub fn latest_ma20(&self) -> Option<f64> {
        latest(&self.ma20)
    }

    pub fn latest_rsi(&self) -> Option<f64> {
        latest(&self.rsi14)
    }

    /// Last `(macd, signal)` pair.
    pub fn latest_macd(&self) -> Option<(f64, f64)> {
        let macd = *self.macd.macd_line.last()?;
        let signal = *self.macd.signal_line.last()?;
        Some((macd, signal))
    }
}
