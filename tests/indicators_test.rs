//! Indicator properties over the public API

use augur::services::indicators::{
    exponential_moving_average, macd, moving_average, relative_strength_index, Ema, Indicator, Macd,
    Rsi, Sma,
};

fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + (i as f64 * 0.4).sin() * 8.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn test_moving_average_warm_up() {
    let prices = wave(40);
    let ma = moving_average(&prices, 20);
    assert_eq!(ma.len(), prices.len());
    assert!(ma[..19].iter().all(Option::is_none));
    assert!(ma[19..].iter().all(Option::is_some));

    let expected: f64 = prices[..20].iter().sum::<f64>() / 20.0;
    assert!((ma[19].unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_moving_average_longer_than_series() {
    let ma = moving_average(&[1.0, 2.0, 3.0], 5);
    assert_eq!(ma, vec![None, None, None]);
}

#[test]
fn test_ema_starts_at_first_price() {
    let prices = wave(30);
    let ema = exponential_moving_average(&prices, 12);
    assert_eq!(ema.len(), prices.len());
    assert_eq!(ema[0], prices[0]);

    let k = Ema::new(12).multiplier();
    let next = prices[1] * k + prices[0] * (1.0 - k);
    assert!((ema[1] - next).abs() < 1e-12);
}

#[test]
fn test_rsi_saturates_on_monotonic_rise() {
    let prices: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
    let rsi = relative_strength_index(&prices, 14);
    assert!(rsi[..14].iter().all(Option::is_none));
    assert!(rsi[14..].iter().all(|v| *v == Some(100.0)));
}

#[test]
fn test_rsi_stays_in_range() {
    let rsi = Rsi::default().compute(&wave(120));
    for value in rsi.into_iter().flatten() {
        assert!((0.0..=100.0).contains(&value));
    }
}

#[test]
fn test_macd_histogram_identity() {
    let series = macd(&wave(80));
    assert_eq!(series.macd_line.len(), 80);
    for i in 0..80 {
        let diff = series.macd_line[i] - series.signal_line[i];
        assert!((series.histogram[i] - diff).abs() < 1e-12);
    }
}

#[test]
fn test_macd_line_is_ema_difference() {
    let prices = wave(50);
    let series = Macd::default().compute(&prices);
    let fast = exponential_moving_average(&prices, 12);
    let slow = exponential_moving_average(&prices, 26);
    for i in 0..prices.len() {
        assert!((series.macd_line[i] - (fast[i] - slow[i])).abs() < 1e-9);
    }
}

#[test]
fn test_indicator_metadata() {
    assert_eq!(Sma::new(5).min_periods(), 5);
    assert_eq!(Rsi::default().min_periods(), 15);
    assert!(!Macd::default().id().is_empty());
}
