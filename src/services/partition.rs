//! Equal-width price interval partitioning.

use crate::error::AnalysisError;
use crate::services::estimator::ProbabilityEstimator;
use crate::types::{validate_intervals, ConfidenceThreshold, Interval, PriceBucket};

/// Equal-width buckets spanning `[min(prices), max(prices)]`.
///
/// Adjacent buckets share their boundary and the last upper bound is exactly
/// the maximum. A flat series yields a single bucket `[p, p]`.
pub fn price_buckets(prices: &[f64], count: usize) -> Result<Vec<PriceBucket>, AnalysisError> {
    validate_intervals(count)?;
    if prices.is_empty() {
        return Err(AnalysisError::InvalidSeries("no prices to partition".to_string()));
    }
    if prices.iter().any(|p| !p.is_finite()) {
        return Err(AnalysisError::InvalidSeries("non-finite price".to_string()));
    }

    let (min, max) = prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });

    if max == min {
        return Ok(vec![PriceBucket {
            index: 0,
            lower: min,
            upper: max,
            is_last: true,
        }]);
    }

    let width = (max - min) / count as f64;
    let buckets = (0..count)
        .map(|i| {
            let is_last = i == count - 1;
            PriceBucket {
                index: i,
                lower: min + i as f64 * width,
                upper: if is_last {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                is_last,
            }
        })
        .collect();

    Ok(buckets)
}

/// Partition `prices` and classify each bucket against `confidence`.
pub fn partition<E: ProbabilityEstimator + ?Sized>(
    prices: &[f64],
    intervals_count: usize,
    confidence: ConfidenceThreshold,
    estimator: &E,
) -> Result<Vec<Interval>, AnalysisError> {
    let buckets = price_buckets(prices, intervals_count)?;

    Ok(buckets
        .iter()
        .map(|bucket| {
            let estimate = estimator.estimate(bucket);
            Interval {
                lower_bound: bucket.lower,
                upper_bound: bucket.upper,
                probability: estimate.probability * 100.0,
                is_buy_signal: confidence.is_met_by(estimate.probability),
                sample_size: estimate.sample_size,
                avg_profit: estimate.avg_profit,
            }
        })
        .collect())
}
