//! Analysis orchestration.
//!
//! [`run_analysis`] is the pure pipeline from a series to a report.
//! [`AnalysisService`] adds series loading (cache, live source with retry,
//! mock fallback), the optional parameter search and stale-request gating.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{AnalysisDefaults, Config, FetchConfig};
use crate::error::{AnalysisError, AppError, Result, SourceError};
use crate::services::cache::Cache;
use crate::services::estimator::ForwardReturnEstimator;
use crate::services::gate::RequestGate;
use crate::services::indicators::compute_indicators;
use crate::services::optimizer::{GeneticOptimizer, OptimizerConfig};
use crate::services::partition::partition;
use crate::services::rules::generate_trading_rules;
use crate::services::technical::analyze_technical;
use crate::services::volume::analyze_volume;
use crate::sources::{fetch_with_retry, twse, MockSource, RetryPolicy, SeriesSource};
use crate::types::{AnalysisParams, AnalysisReport, ConfidenceThreshold, Series, SeriesOrigin};

/// Run every analyzer over `series`.
///
/// Parameter errors are returned; a series the partitioner rejects yields an
/// empty report.
pub fn run_analysis(
    series: &Series,
    params: &AnalysisParams,
    origin: SeriesOrigin,
) -> std::result::Result<AnalysisReport, AnalysisError> {
    params.validate()?;

    let estimator = ForwardReturnEstimator::new(
        series.prices(),
        params.holding_period,
        params.target_profit_ratio,
    );
    let intervals = match partition(series.prices(), params.intervals, params.confidence, &estimator) {
        Ok(intervals) => intervals,
        Err(AnalysisError::InvalidSeries(_)) => {
            return Ok(AnalysisReport::empty(series.symbol(), origin, params.clone()))
        }
        Err(e) => return Err(e),
    };

    let indicators = compute_indicators(series);

    Ok(AnalysisReport {
        symbol: series.symbol().to_string(),
        origin,
        params: params.clone(),
        samples: series.len(),
        latest_price: Some(series.latest_price()),
        technical: analyze_technical(&indicators),
        volume: analyze_volume(series.volumes(), params.volume_days),
        rules: generate_trading_rules(&intervals),
        intervals,
        optimization: None,
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// Build a series from raw columns and analyze it. Columns that do not form a
/// valid series produce an empty report.
pub fn analyze_columns(
    symbol: &str,
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
    volumes: Vec<u64>,
    params: &AnalysisParams,
) -> std::result::Result<AnalysisReport, AnalysisError> {
    params.validate()?;
    match Series::new(symbol, dates, prices, volumes) {
        Ok(series) => run_analysis(&series, params, SeriesOrigin::Live),
        Err(AnalysisError::InvalidSeries(_)) => {
            Ok(AnalysisReport::empty(symbol, SeriesOrigin::Live, params.clone()))
        }
        Err(e) => Err(e),
    }
}

type SeriesKey = (String, u32);

/// Loads series and runs analyses on behalf of the API.
pub struct AnalysisService {
    source: Arc<dyn SeriesSource>,
    mock: MockSource,
    cache: Cache<SeriesKey, Series>,
    gate: RequestGate,
    retry: RetryPolicy,
    fetch: FetchConfig,
    defaults: AnalysisDefaults,
    optimizer: OptimizerConfig,
}

impl AnalysisService {
    pub fn new(source: Arc<dyn SeriesSource>, config: &Config) -> Self {
        Self {
            source,
            mock: MockSource::new(),
            cache: Cache::new(config.fetch.cache_ttl()),
            gate: RequestGate::new(),
            retry: RetryPolicy::from(&config.fetch),
            fetch: config.fetch.clone(),
            defaults: config.analysis.clone(),
            optimizer: OptimizerConfig::default(),
        }
    }

    pub fn with_mock(mut self, mock: MockSource) -> Self {
        self.mock = mock;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Parameters from the configured defaults.
    pub fn default_params(&self) -> std::result::Result<AnalysisParams, AnalysisError> {
        let params = AnalysisParams {
            holding_period: self.defaults.holding_period,
            intervals: self.defaults.intervals,
            target_profit_ratio: self.defaults.target_profit_ratio,
            confidence: ConfidenceThreshold::from_either(self.defaults.confidence)?,
            volume_days: self.defaults.volume_days,
        };
        params.validate()?;
        Ok(params)
    }

    /// Fetch the series for `symbol`, preferring the cache.
    ///
    /// Live failures fall back to a mock series when enabled; the returned
    /// origin says which path produced it.
    pub async fn load_series(&self, symbol: &str) -> std::result::Result<(Series, SeriesOrigin), SourceError> {
        let key = (symbol.to_string(), self.fetch.lookback_days);
        if let Some(series) = self.cache.get(&key) {
            debug!(symbol, "series cache hit");
            return Ok((series, SeriesOrigin::Cached));
        }

        match fetch_with_retry(self.source.as_ref(), symbol, self.fetch.lookback_days, &self.retry).await {
            Ok(series) => {
                info!(symbol, samples = series.len(), source = self.source.name(), "fetched series");
                self.cache.insert(key, series.clone());
                Ok((series, SeriesOrigin::Live))
            }
            Err(err) if self.fetch.mock_fallback => {
                warn!(symbol, %err, "live fetch failed, using mock series");
                let series = self.mock.fetch_series(symbol, self.fetch.lookback_days).await?;
                Ok((
                    series,
                    SeriesOrigin::Mock {
                        reason: err.to_string(),
                    },
                ))
            }
            Err(err) => Err(err),
        }
    }

    /// Analyze `symbol`. With `optimize`, the genetic search picks the
    /// parameters and `params` only supplies the volume window.
    pub async fn analyze(&self, symbol: &str, params: AnalysisParams, optimize: bool) -> Result<AnalysisReport> {
        let symbol = symbol.trim();
        if !twse::is_valid_stock_code(symbol) {
            return Err(AppError::BadRequest(format!("invalid stock code: {}", symbol)));
        }
        params.validate()?;

        let (series, origin) = self.load_series(symbol).await?;

        let optimization = if optimize {
            let prices = series.prices().to_vec();
            let base = params.clone();
            let config = self.optimizer.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                GeneticOptimizer::new(config).optimize(&prices, &base)
            })
            .await
            .map_err(|e| AppError::Internal(format!("optimizer task failed: {}", e)))?;
            match &outcome {
                Some(found) => info!(symbol, fitness = found.fitness, "optimizer found parameters"),
                None => debug!(symbol, "optimizer found no buy interval, keeping parameters"),
            }
            outcome
        } else {
            None
        };

        let effective = optimization
            .as_ref()
            .map_or_else(|| params.clone(), |found| found.params.clone());
        let mut report = run_analysis(&series, &effective, origin)?;
        report.optimization = optimization;

        debug!(
            symbol,
            intervals = report.intervals.len(),
            risk = ?report.technical.risk_level(),
            "analysis complete"
        );
        Ok(report)
    }

    /// Like [`AnalysisService::analyze`], but returns `None` if a newer
    /// request from the same client started before this one finished,
    /// whether this one succeeded or failed.
    pub async fn analyze_for_client(
        &self,
        client: &str,
        symbol: &str,
        params: AnalysisParams,
        optimize: bool,
    ) -> Result<Option<AnalysisReport>> {
        let token = self.gate.begin(client);
        let outcome = self.analyze(symbol, params, optimize).await;
        match outcome {
            Ok(report) => {
                let accepted = token.accept(report);
                if accepted.is_none() {
                    debug!(client, symbol, "discarding superseded analysis");
                }
                Ok(accepted)
            }
            Err(err) => match token.accept(()) {
                Some(()) => Err(err),
                None => {
                    debug!(client, symbol, %err, "discarding superseded failure");
                    Ok(None)
                }
            },
        }
    }

    /// Clients with an analysis in flight.
    pub fn pending_requests(&self) -> usize {
        self.gate.pending()
    }

    /// Drop expired cached series.
    pub fn purge_cache(&self) {
        self.cache.purge_expired();
    }
}
