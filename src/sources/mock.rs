//! Deterministic stand-in series used when the live source is unavailable.
//!
//! Prices follow a seeded random walk starting at 100 with uniform daily
//! moves of up to 2%. The same instrument and anchor date always produce the
//! same series.

use async_trait::async_trait;
use chrono::{Datelike, Duration as ChronoDuration, Local, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;

use super::SeriesSource;
use crate::error::SourceError;
use crate::types::Series;

const START_PRICE: f64 = 100.0;
const MAX_DAILY_MOVE: f64 = 0.02;
const MIN_VOLUME: u64 = 1_000;
const MAX_VOLUME: u64 = 5_000;

/// Stable 64-bit FNV-1a hash, used to derive a per-instrument seed.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The last `count` weekdays on or before `anchor`, oldest first.
fn business_days_until(anchor: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut day = anchor;
    while dates.len() < count {
        if is_business_day(day) {
            dates.push(day);
        }
        match day.checked_sub_signed(ChronoDuration::days(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    dates.reverse();
    dates
}

#[derive(Debug, Clone)]
pub struct MockSource {
    seed: Option<u64>,
    anchor: Option<NaiveDate>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            seed: None,
            anchor: None,
        }
    }

    /// Use one fixed seed for every instrument.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// End the generated series at `anchor` instead of today.
    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    fn seed_for(&self, instrument: &str) -> u64 {
        self.seed
            .unwrap_or_else(|| fnv1a(instrument.trim().to_uppercase().as_bytes()))
    }

    /// Generate `len` business days of history for `instrument`.
    pub fn generate(&self, instrument: &str, len: usize) -> Result<Series, SourceError> {
        let anchor = self.anchor.unwrap_or_else(|| Local::now().date_naive());
        let dates = business_days_until(anchor, len.max(1));
        let mut rng = StdRng::seed_from_u64(self.seed_for(instrument));

        let mut price = START_PRICE;
        let mut prices = Vec::with_capacity(dates.len());
        let mut volumes = Vec::with_capacity(dates.len());
        for i in 0..dates.len() {
            if i > 0 {
                price *= 1.0 + rng.gen_range(-MAX_DAILY_MOVE..MAX_DAILY_MOVE);
            }
            prices.push(price);
            volumes.push(rng.gen_range(MIN_VOLUME..MAX_VOLUME));
        }

        Series::new(instrument, dates, prices, volumes)
            .map_err(|e| SourceError::InvalidSeries(e.to_string()))
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Trading days in a span of calendar days, at five per seven.
fn trading_days(lookback_days: u32) -> usize {
    ((lookback_days as usize) * 5 / 7).max(1)
}

#[async_trait]
impl SeriesSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_series(&self, instrument: &str, lookback_days: u32) -> Result<Series, SourceError> {
        self.generate(instrument, trading_days(lookback_days))
    }
}
