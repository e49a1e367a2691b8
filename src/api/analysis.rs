//! Analysis API endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::render_rules;
use crate::types::{AnalysisParams, AnalysisReport, ConfidenceThreshold, SeriesOrigin};
use crate::AppState;

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Serialize)]
pub struct ApiMeta {
    pub cached: bool,
}

/// Query parameters for the analysis endpoint. Missing values use the
/// configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQuery {
    pub holding_period: Option<usize>,
    pub intervals: Option<usize>,
    /// Fraction (0-1) or percent (above 1).
    pub confidence: Option<f64>,
    pub target_profit_ratio: Option<f64>,
    pub volume_days: Option<usize>,
    #[serde(default)]
    pub optimize: bool,
    /// Caller identity for superseding stale requests.
    pub client: Option<String>,
}

impl AnalysisQuery {
    /// Overlay the query on `defaults`.
    pub fn params(&self, defaults: AnalysisParams) -> Result<AnalysisParams> {
        let confidence = match self.confidence {
            Some(value) => ConfidenceThreshold::from_either(value)?,
            None => defaults.confidence,
        };
        let params = AnalysisParams {
            holding_period: self.holding_period.unwrap_or(defaults.holding_period),
            intervals: self.intervals.unwrap_or(defaults.intervals),
            target_profit_ratio: self.target_profit_ratio.unwrap_or(defaults.target_profit_ratio),
            confidence,
            volume_days: self.volume_days.unwrap_or(defaults.volume_days),
        };
        params.validate()?;
        Ok(params)
    }
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:symbol", get(get_analysis))
        .route("/:symbol/rules", get(get_rules))
}

async fn run(state: &AppState, symbol: &str, query: &AnalysisQuery) -> Result<AnalysisReport> {
    let params = query.params(state.analysis.default_params()?)?;

    match query.client.as_deref().filter(|c| !c.is_empty()) {
        Some(client) => state
            .analysis
            .analyze_for_client(client, symbol, params, query.optimize)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!("analysis of {} superseded by a newer request", symbol))
            }),
        None => state.analysis.analyze(symbol, params, query.optimize).await,
    }
}

/// Full analysis report for a stock.
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<ApiResponse<AnalysisReport>>> {
    let report = run(&state, &symbol, &query).await?;
    let cached = report.origin == SeriesOrigin::Cached;

    Ok(Json(ApiResponse {
        data: report,
        meta: ApiMeta { cached },
    }))
}

/// Trading rules as plain text.
async fn get_rules(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<String> {
    let report = run(&state, &symbol, &query).await?;
    Ok(render_rules(&report.rules))
}
