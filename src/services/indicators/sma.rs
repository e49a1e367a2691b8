//! Simple Moving Average (SMA) indicator.

use super::Indicator;

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of the last `period` values. The first `period - 1`
/// positions have no full window and are `None`.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = Vec<Option<f64>>;

    fn id(&self) -> &str {
        match self.period {
            5 => "ma5",
            20 => "ma20",
            _ => "ma",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, values: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; values.len()];
        if self.period == 0 || values.len() < self.period {
            return out;
        }

        for (i, window) in values.windows(self.period).enumerate() {
            out[i + self.period - 1] = Some(window.iter().sum::<f64>() / self.period as f64);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_id() {
        assert_eq!(Sma::new(5).id(), "ma5");
        assert_eq!(Sma::new(20).id(), "ma20");
        assert_eq!(Sma::new(7).id(), "ma");
    }

    #[test]
    fn test_sma_warm_up_gap() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ma = Sma::new(3).compute(&values);
        assert_eq!(ma.len(), values.len());
        assert_eq!(ma[0], None);
        assert_eq!(ma[1], None);
        assert_eq!(ma[2], Some(2.0));
        assert_eq!(ma[5], Some(5.0));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let ma = Sma::new(20).compute(&[1.0; 19]);
        assert_eq!(ma.len(), 19);
        assert!(ma.iter().all(Option::is_none));
    }

    #[test]
    fn test_sma_zero_period() {
        let ma = Sma::new(0).compute(&[1.0, 2.0]);
        assert_eq!(ma, vec![None, None]);
    }

    #[test]
    fn test_sma_period_one_is_identity() {
        let values = [3.5, 4.5, 1.0];
        let ma = Sma::new(1).compute(&values);
        assert_eq!(ma, vec![Some(3.5), Some(4.5), Some(1.0)]);
    }
}
