//! Technical signal analysis.
//!
//! A fixed pipeline over the latest indicator values: moving-average trend,
//! then RSI, then MACD. Each step takes the accumulated result and returns it
//! extended, so signal order is always MA, RSI, MACD.

use crate::types::{AnalysisResult, IndicatorSet, RiskLevel, Signal};

/// MA5/MA20 spread beyond which a divergence signal fires.
pub const MA_DIVERGENCE_THRESHOLD: f64 = 0.05;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Run every step over the latest values of `indicators`.
///
/// Steps whose inputs are still in their warm-up window are skipped.
pub fn analyze_technical(indicators: &IndicatorSet) -> AnalysisResult {
    let mut result = AnalysisResult::new();

    if let (Some(ma5), Some(ma20)) = (indicators.latest_ma5(), indicators.latest_ma20()) {
        result = analyze_moving_averages(result, ma5, ma20);
    }
    if let Some(rsi) = indicators.latest_rsi() {
        result = analyze_rsi(result, rsi);
    }
    if let Some((macd, signal)) = indicators.latest_macd() {
        result = analyze_macd(result, macd, signal);
    }

    result
}

/// Short-term trend from MA5 vs MA20.
pub fn analyze_moving_averages(result: AnalysisResult, ma5: f64, ma20: f64) -> AnalysisResult {
    let ratio = (ma20 != 0.0).then(|| ma5 / ma20);

    if ma5 > ma20 {
        let result = result.with_signal(Signal::info("Short-term uptrend: MA5 is above MA20"));
        match ratio {
            Some(r) if r > 1.0 + MA_DIVERGENCE_THRESHOLD => result
                .with_signal(Signal::warning(
                    "MA5 is more than 5% above MA20, watch for pullback risk",
                ))
                .with_risk_at_least(RiskLevel::High),
            _ => result,
        }
    } else {
        let result =
            result.with_signal(Signal::info("Short-term downtrend: MA5 is at or below MA20"));
        match ratio {
            // Oversold divergence does not raise risk.
            Some(r) if r < 1.0 - MA_DIVERGENCE_THRESHOLD => result.with_signal(Signal::warning(
                "MA5 is more than 5% below MA20, possibly oversold",
            )),
            _ => result,
        }
    }
}

/// Overbought/oversold classification of the latest RSI.
pub fn analyze_rsi(result: AnalysisResult, rsi: f64) -> AnalysisResult {
    if rsi > RSI_OVERBOUGHT {
        result
            .with_signal(Signal::warning(format!(
                "RSI overbought at {:.2}, consider taking profit",
                rsi
            )))
            .with_risk_at_least(RiskLevel::High)
    } else if rsi < RSI_OVERSOLD {
        result.with_signal(Signal::info(format!(
            "RSI oversold at {:.2}, consider buying",
            rsi
        )))
    } else {
        result.with_signal(Signal::info(format!("RSI in normal range at {:.2}", rsi)))
    }
}

/// Momentum from the MACD line against its signal line.
pub fn analyze_macd(result: AnalysisResult, macd: f64, signal: f64) -> AnalysisResult {
    if macd > signal {
        let result =
            result.with_signal(Signal::info("MACD bullish: MACD line is above the signal line"));
        if macd > 0.0 {
            result.with_signal(Signal::info("MACD above zero, bull trend confirmed"))
        } else {
            result
        }
    } else {
        let result =
            result.with_signal(Signal::info("MACD bearish: MACD line is below the signal line"));
        if macd < 0.0 {
            result.with_signal(Signal::info("MACD below zero, bear trend confirmed"))
        } else {
            result
        }
    }
}
