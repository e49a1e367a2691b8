//! Data sources that produce a [`Series`] for an instrument.

pub mod mock;
pub mod retry;
pub mod twse;
pub mod yahoo;

pub use mock::MockSource;
pub use retry::{fetch_with_retry, FetchState, RetryPolicy};
pub use yahoo::YahooSource;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::Series;

/// A provider of daily close/volume history.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch roughly `lookback_days` calendar days of history for `instrument`.
    async fn fetch_series(&self, instrument: &str, lookback_days: u32) -> Result<Series, SourceError>;
}
