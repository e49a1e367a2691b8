//! Buy-probability estimators for price buckets.

use crate::types::PriceBucket;

/// Estimate for one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketEstimate {
    /// Fraction in `[0, 1]`.
    pub probability: f64,
    pub sample_size: usize,
    pub avg_profit: Option<f64>,
}

impl BucketEstimate {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability: clamp_probability(probability),
            sample_size: 0,
            avg_profit: None,
        }
    }
}

fn clamp_probability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Source of the per-bucket buy probability.
pub trait ProbabilityEstimator {
    fn estimate(&self, bucket: &PriceBucket) -> BucketEstimate;
}

impl<F> ProbabilityEstimator for F
where
    F: Fn(&PriceBucket) -> f64,
{
    fn estimate(&self, bucket: &PriceBucket) -> BucketEstimate {
        BucketEstimate::from_probability(self(bucket))
    }
}

/// Empirical forward-return frequency.
///
/// Every index `i` with `i + holding_period < len` is a sample: buy at
/// `prices[i]`, sell `holding_period` samples later. A sample belongs to the
/// bucket containing its buy price. The probability is the share of the
/// bucket's samples whose profit reaches `target_profit_ratio` times the
/// bucket width.
pub struct ForwardReturnEstimator<'a> {
    prices: &'a [f64],
    holding_period: usize,
    target_profit_ratio: f64,
}

impl<'a> ForwardReturnEstimator<'a> {
    pub fn new(prices: &'a [f64], holding_period: usize, target_profit_ratio: f64) -> Self {
        Self {
            prices,
            holding_period,
            target_profit_ratio,
        }
    }

    /// `(buy, sell)` price pairs over the holding period.
    fn trades(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let count = self.prices.len().saturating_sub(self.holding_period);
        (0..count).map(move |i| (self.prices[i], self.prices[i + self.holding_period]))
    }
}

impl ProbabilityEstimator for ForwardReturnEstimator<'_> {
    fn estimate(&self, bucket: &PriceBucket) -> BucketEstimate {
        let profits: Vec<f64> = self
            .trades()
            .filter(|(buy, _)| bucket.contains(*buy))
            .map(|(buy, sell)| sell - buy)
            .collect();

        if profits.is_empty() {
            return BucketEstimate {
                probability: 0.0,
                sample_size: 0,
                avg_profit: None,
            };
        }

        let target = self.target_profit_ratio * bucket.width();
        let hits = profits.iter().filter(|p| **p >= target).count();

        BucketEstimate {
            probability: hits as f64 / profits.len() as f64,
            sample_size: profits.len(),
            avg_profit: Some(profits.iter().sum::<f64>() / profits.len() as f64),
        }
    }
}
