//! Unit tests for types module

use augur::types::*;
use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn test_series_rejects_misaligned_columns() {
    let err = Series::new("2330", vec![day(1), day(4)], vec![1.0], vec![1, 2]).unwrap_err();
    assert!(matches!(err, augur::AnalysisError::InvalidSeries(_)));
}

#[test]
fn test_series_rejects_unordered_dates() {
    assert!(Series::new("2330", vec![day(4), day(1)], vec![1.0, 2.0], vec![1, 2]).is_err());
    assert!(Series::new("2330", vec![day(4), day(4)], vec![1.0, 2.0], vec![1, 2]).is_err());
}

#[test]
fn test_series_json_is_validated() {
    let ok = r#"{"symbol":"2330","dates":["2024-03-01","2024-03-04"],"prices":[590.0,593.0],"volumes":[100,200]}"#;
    let series: Series = serde_json::from_str(ok).unwrap();
    assert_eq!(series.latest_price(), 593.0);
    assert_eq!(series.prices(), &[590.0, 593.0]);

    let bad = r#"{"symbol":"2330","dates":["2024-03-01"],"prices":[590.0,593.0],"volumes":[100,200]}"#;
    assert!(serde_json::from_str::<Series>(bad).is_err());
}

#[test]
fn test_confidence_scales() {
    let fraction = ConfidenceThreshold::from_fraction(0.7).unwrap();
    let percent = ConfidenceThreshold::from_percent(70.0).unwrap();
    assert!((fraction.fraction() - percent.fraction()).abs() < 1e-12);
    assert!((ConfidenceThreshold::from_either(70.0).unwrap().percent() - 70.0).abs() < 1e-9);
    assert!(ConfidenceThreshold::from_fraction(1.2).is_err());
    assert!(ConfidenceThreshold::from_percent(-5.0).is_err());
    assert!(serde_json::from_str::<ConfidenceThreshold>("1.5").is_err());
}

#[test]
fn test_confidence_comparison_is_inclusive() {
    let threshold = ConfidenceThreshold::from_fraction(0.6).unwrap();
    assert!(threshold.is_met_by(0.6));
    assert!(!threshold.is_met_by(0.5999));
}

#[test]
fn test_last_bucket_is_closed() {
    let inner = PriceBucket { index: 0, lower: 10.0, upper: 20.0, is_last: false };
    let last = PriceBucket { index: 1, lower: 20.0, upper: 30.0, is_last: true };
    assert!(inner.contains(10.0));
    assert!(!inner.contains(20.0));
    assert!(last.contains(20.0));
    assert!(last.contains(30.0));
    assert_eq!(last.width(), 10.0);
}

#[test]
fn test_risk_level_only_rises() {
    let result = AnalysisResult::new()
        .with_risk_at_least(RiskLevel::High)
        .with_risk_at_least(RiskLevel::Medium);
    assert_eq!(result.risk_level(), RiskLevel::High);
    assert_eq!(result.risk_level().level(), 2);
}

#[test]
fn test_origin_serialization() {
    let json = serde_json::to_value(SeriesOrigin::Cached).unwrap();
    assert_eq!(json["kind"], "cached");
    assert!(!SeriesOrigin::Live.is_mock());
}

#[test]
fn test_history_range_covering() {
    assert_eq!(HistoryRange::covering(30), HistoryRange::OneMonth);
    assert_eq!(HistoryRange::covering(365), HistoryRange::OneYear);
    assert_eq!(HistoryRange::covering(1825), HistoryRange::FiveYears);
    assert_eq!(HistoryRange::covering(10_000), HistoryRange::Max);
    assert_eq!(HistoryRange::covering(1825).as_str(), "5y");
}

#[test]
fn test_trading_rule_display() {
    let rule = TradingRule {
        action: RuleAction::Buy,
        lower_bound: 500.0,
        upper_bound: 550.0,
        stop_loss: Some(400.0),
        probability: 72.5,
        avg_profit: Some(18.25),
        sample_size: 40,
    };
    let text = rule.to_string();
    assert!(text.starts_with("Buy rule"));
    assert!(text.contains("500.00-550.00"));
    assert!(text.contains("400.00"));
    assert!(text.contains("72.5%"));
    assert!(text.contains("40 historical samples"));
}

#[test]
fn test_stock_label() {
    let stock = StockInfo {
        code: "2330".to_string(),
        name: "台積電".to_string(),
        industry: "半導體業".to_string(),
    };
    assert_eq!(stock.label(), "2330 - 台積電");
}
