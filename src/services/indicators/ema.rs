//! Exponential Moving Average (EMA) indicator.

use super::Indicator;

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. Seeded with the first
/// value, so every position is defined.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Smoothing factor `2 / (period + 1)`.
    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    type Output = Vec<f64>;

    fn id(&self) -> &str {
        match self.period {
            9 => "ema9",
            12 => "ema12",
            26 => "ema26",
            _ => "ema",
        }
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let k = self.multiplier();
        let mut out = Vec::with_capacity(values.len());

        let mut iter = values.iter();
        let Some(&first) = iter.next() else {
            return out;
        };
        out.push(first);

        let mut prev = first;
        for &value in iter {
            prev = value * k + prev * (1.0 - k);
            out.push(prev);
        }

        out
    }
}
