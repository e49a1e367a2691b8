//! Yahoo Finance chart API client for Taiwan-listed stocks.
//!
//! TWSE listings are quoted as `{code}.TW`. Uses the unofficial chart
//! endpoint with daily bars.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::SeriesSource;
use crate::error::SourceError;
use crate::types::{HistoryRange, Series};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Exchange-qualified ticker: "2330" -> "2330.TW".
fn yahoo_ticker(code: &str) -> String {
    let code = code.trim().to_uppercase();
    if code.contains('.') {
        code
    } else {
        format!("{}.TW", code)
    }
}

/// Yahoo Finance client.
pub struct YahooSource {
    client: Client,
    base_url: String,
}

impl YahooSource {
    /// Create a new Yahoo Finance client.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: CHART_BASE_URL.to_string(),
        }
    }

    /// Point the client at another chart endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chart_url(&self, code: &str, range: HistoryRange) -> String {
        format!(
            "{}/{}?range={}&interval=1d&includePrePost=false",
            self.base_url,
            yahoo_ticker(code),
            range.as_str()
        )
    }
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Turn a decoded chart response into a series.
///
/// Bars with a missing or non-positive close are skipped; a missing volume
/// counts as zero. Bars sharing a calendar date keep the later one.
fn parse_chart(code: &str, data: YahooChartResponse) -> Result<Series, SourceError> {
    if let Some(error) = data.chart.error {
        if error.code.eq_ignore_ascii_case("not found") {
            return Err(SourceError::NotFound(format!("{}: {}", code, error.description)));
        }
        return Err(SourceError::Parse(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| SourceError::NotFound(format!("{}: empty chart result", code)))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| SourceError::Parse("No timestamps in response".to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::Parse("No quote data in response".to_string()))?;

    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut dates: Vec<NaiveDate> = Vec::with_capacity(timestamps.len());
    let mut prices = Vec::with_capacity(timestamps.len());
    let mut vols = Vec::with_capacity(timestamps.len());

    for (i, &timestamp) in timestamps.iter().enumerate() {
        let close = closes.get(i).copied().flatten().unwrap_or(0.0);
        if !close.is_finite() || close <= 0.0 {
            continue;
        }
        let Some(date) = DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        let volume = volumes.get(i).copied().flatten().unwrap_or(0);

        if dates.last() == Some(&date) {
            let last = prices.len() - 1;
            prices[last] = close;
            vols[last] = volume;
            continue;
        }
        if dates.last().is_some_and(|last| *last > date) {
            continue;
        }

        dates.push(date);
        prices.push(close);
        vols.push(volume);
    }

    Series::new(code, dates, prices, vols).map_err(|e| SourceError::InvalidSeries(e.to_string()))
}

#[async_trait]
impl SeriesSource for YahooSource {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_series(&self, instrument: &str, lookback_days: u32) -> Result<Series, SourceError> {
        let url = self.chart_url(instrument, HistoryRange::covering(lookback_days));

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::from_status(
                status.as_u16(),
                &format!("{} chart request failed", instrument),
            ));
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        parse_chart(instrument, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Series, SourceError> {
        let data: YahooChartResponse = serde_json::from_str(json).unwrap();
        parse_chart("2330", data)
    }

    #[test]
    fn test_yahoo_ticker() {
        assert_eq!(yahoo_ticker("2330"), "2330.TW");
        assert_eq!(yahoo_ticker(" 2317 "), "2317.TW");
        assert_eq!(yahoo_ticker("6488.two"), "6488.TWO");
    }

    #[test]
    fn test_chart_url() {
        let source = YahooSource::default().with_base_url("http://localhost:9999/chart");
        assert_eq!(
            source.chart_url("2330", HistoryRange::FiveYears),
            "http://localhost:9999/chart/2330.TW?range=5y&interval=1d&includePrePost=false"
        );
    }

    #[test]
    fn test_parse_chart() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000, 1704326400, 1704412800],
                    "indicators": {
                        "quote": [{
                            "close": [590.0, null, 586.0, 593.0],
                            "volume": [25000, 31000, null, 28000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let series = parse(json).unwrap();
        assert_eq!(series.symbol(), "2330");
        assert_eq!(series.prices(), &[590.0, 586.0, 593.0]);
        assert_eq!(series.volumes(), &[25000, 0, 28000]);
        assert_eq!(
            series.dates()[0],
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_parse_chart_not_found() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;
        assert!(matches!(parse(json), Err(SourceError::NotFound(_))));
    }

    #[test]
    fn test_parse_chart_without_bars() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600],
                    "indicators": {"quote": [{"close": [null], "volume": [null]}]}
                }],
                "error": null
            }
        }"#;
        assert!(matches!(parse(json), Err(SourceError::InvalidSeries(_))));
    }

    #[test]
    fn test_parse_chart_missing_timestamps() {
        let json = r#"{
            "chart": {
                "result": [{"indicators": {"quote": [{}]}}],
                "error": null
            }
        }"#;
        assert!(matches!(parse(json), Err(SourceError::Parse(_))));
    }
}
