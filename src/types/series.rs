use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Daily close/volume history for one instrument.
///
/// Construction validates alignment: `dates`, `prices` and `volumes` have the
/// same non-zero length, dates strictly increase and prices are finite.
/// A series is never mutated after construction; every analysis request
/// builds (or clones) its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSeries")]
pub struct Series {
    symbol: String,
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
    volumes: Vec<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeries {
    symbol: String,
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
    volumes: Vec<u64>,
}

impl TryFrom<RawSeries> for Series {
    type Error = AnalysisError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Series::new(raw.symbol, raw.dates, raw.prices, raw.volumes)
    }
}

impl Series {
    pub fn new(
        symbol: impl Into<String>,
        dates: Vec<NaiveDate>,
        prices: Vec<f64>,
        volumes: Vec<u64>,
    ) -> Result<Self, AnalysisError> {
        if prices.is_empty() {
            return Err(AnalysisError::InvalidSeries("series is empty".to_string()));
        }
        if dates.len() != prices.len() || volumes.len() != prices.len() {
            return Err(AnalysisError::InvalidSeries(format!(
                "misaligned series: {} dates, {} prices, {} volumes",
                dates.len(),
                prices.len(),
                volumes.len()
            )));
        }
        if let Some(i) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(AnalysisError::InvalidSeries(format!(
                "dates not strictly increasing at index {}",
                i + 1
            )));
        }
        if let Some(i) = prices.iter().position(|p| !p.is_finite()) {
            return Err(AnalysisError::InvalidSeries(format!(
                "non-finite price at index {}",
                i
            )));
        }

        Ok(Self {
            symbol: symbol.into(),
            dates,
            prices,
            volumes,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn volumes(&self) -> &[u64] {
        &self.volumes
    }

    /// Number of samples (always at least 1).
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Most recent close.
    pub fn latest_price(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }

    /// Most recent date.
    pub fn latest_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }
}

/// Where the series of an analysis came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesOrigin {
    /// Fetched from the live data source.
    Live,
    /// Served from the in-memory series cache.
    Cached,
    /// Generated locally after the live source failed.
    Mock { reason: String },
}

impl SeriesOrigin {
    pub fn is_mock(&self) -> bool {
        matches!(self, SeriesOrigin::Mock { .. })
    }
}
