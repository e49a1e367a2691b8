use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the pure analysis pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors raised at the data-source boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Instrument not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Source returned an invalid series: {0}")]
    InvalidSeries(String),
}

impl SourceError {
    /// Whether another attempt may succeed.
    ///
    /// Not-found and client errors are permanent, except request timeouts (408)
    /// and rate limiting (429).
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::NotFound(_) => false,
            SourceError::Http { status, .. } => {
                !(400..500).contains(status) || *status == 408 || *status == 429
            }
            SourceError::Network(_) | SourceError::Parse(_) | SourceError::InvalidSeries(_) => true,
        }
    }

    /// Classify a non-success HTTP status code.
    pub fn from_status(status: u16, context: &str) -> Self {
        match status {
            404 => SourceError::NotFound(context.to_string()),
            _ => SourceError::Http {
                status,
                message: context.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::from_status(status.as_u16(), &err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Analysis(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Source(e @ SourceError::NotFound(_)) => (StatusCode::NOT_FOUND, e.to_string()),
            AppError::Source(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Reqwest(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::SerdeJson(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Anyhow(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
