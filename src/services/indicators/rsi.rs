//! Relative Strength Index (RSI) indicator.

use super::Indicator;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// Averages are plain means of the last `period` gains/losses ending at each
/// index, so the first `period` positions are `None`.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// RSI from average gain and loss. Zero average loss saturates to 100.
    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
    }
}

impl Indicator for Rsi {
    type Output = Vec<Option<f64>>;

    fn id(&self) -> &str {
        "rsi"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, values: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; values.len()];
        if self.period == 0 || values.len() < self.min_periods() {
            return out;
        }

        // changes[j] is the move into values[j + 1]
        let (gains, losses): (Vec<f64>, Vec<f64>) = values
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let n = self.period as f64;
        for i in self.period..values.len() {
            let start = i - self.period;
            let avg_gain = gains[start..i].iter().sum::<f64>() / n;
            let avg_loss = losses[start..i].iter().sum::<f64>() / n;
            out[i] = Some(Self::from_averages(avg_gain, avg_loss));
        }

        out
    }
}
