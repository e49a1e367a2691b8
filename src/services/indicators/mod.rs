//! Technical indicator implementations.
//!
//! Every indicator maps a price column to an output of the same length,
//! index-aligned with its input.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;

use tracing::debug;

use crate::types::{IndicatorSet, MacdSeries, Series};

/// Trait for implementing technical indicators.
pub trait Indicator {
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Minimum number of samples before the first defined output.
    fn min_periods(&self) -> usize;

    /// Compute the indicator over `values`.
    fn compute(&self, values: &[f64]) -> Self::Output;
}

/// Simple moving average; the first `period - 1` entries are `None`.
pub fn moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    Sma::new(period).compute(values)
}

/// Exponential moving average seeded with `values[0]`.
pub fn exponential_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    Ema::new(period).compute(values)
}

/// Relative strength index; the first `period` entries are `None`.
pub fn relative_strength_index(values: &[f64], period: usize) -> Vec<Option<f64>> {
    Rsi::new(period).compute(values)
}

/// MACD(12, 26, 9).
pub fn macd(values: &[f64]) -> MacdSeries {
    Macd::default().compute(values)
}

fn compute_logged<I: Indicator>(indicator: I, values: &[f64]) -> I::Output {
    if values.len() < indicator.min_periods() {
        debug!(
            indicator = indicator.id(),
            samples = values.len(),
            needed = indicator.min_periods(),
            "too few samples for a defined value"
        );
    }
    indicator.compute(values)
}

/// Indicator set used by the technical analyzer: MA(5), MA(20), RSI(14), MACD.
pub fn compute_indicators(series: &Series) -> IndicatorSet {
    let prices = series.prices();
    IndicatorSet {
        ma5: compute_logged(Sma::new(5), prices),
        ma20: compute_logged(Sma::new(20), prices),
        rsi14: compute_logged(Rsi::default(), prices),
        macd: compute_logged(Macd::default(), prices),
    }
}
