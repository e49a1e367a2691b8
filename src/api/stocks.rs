//! Stock catalogue endpoints.

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::sources::twse;
use crate::types::StockInfo;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    pub industry: Option<String>,
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct StockList {
    pub data: Vec<StockInfo>,
}

#[derive(Serialize)]
pub struct IndustryList {
    pub data: Vec<&'static str>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/industries", get(list_industries))
        .route("/:code", get(get_stock))
}

async fn list_stocks(Query(query): Query<StockQuery>) -> Json<StockList> {
    Json(StockList {
        data: twse::search(query.industry.as_deref(), query.q.as_deref()),
    })
}

async fn list_industries() -> Json<IndustryList> {
    Json(IndustryList {
        data: twse::industries(),
    })
}

async fn get_stock(Path(code): Path<String>) -> Result<Json<StockInfo>> {
    if !twse::is_valid_stock_code(&code) {
        return Err(AppError::BadRequest(format!("invalid stock code: {}", code)));
    }
    twse::lookup(&code)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("stock {} not in catalogue", code)))
}
