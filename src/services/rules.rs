//! Buy/wait rules derived from price intervals.

use crate::types::{Interval, RuleAction, TradingRule};

/// Stop loss sits this fraction below the bucket floor.
const STOP_LOSS_FRACTION: f64 = 0.2;

/// One rule per interval, in interval order.
pub fn generate_trading_rules(intervals: &[Interval]) -> Vec<TradingRule> {
    intervals
        .iter()
        .map(|interval| {
            let action = if interval.is_buy_signal {
                RuleAction::Buy
            } else {
                RuleAction::Wait
            };
            TradingRule {
                action,
                lower_bound: interval.lower_bound,
                upper_bound: interval.upper_bound,
                stop_loss: (action == RuleAction::Buy)
                    .then(|| interval.lower_bound * (1.0 - STOP_LOSS_FRACTION)),
                probability: interval.probability,
                avg_profit: interval.avg_profit,
                sample_size: interval.sample_size,
            }
        })
        .collect()
}

/// Plain-text rendering of `rules`, one block per rule.
pub fn render_rules(rules: &[TradingRule]) -> String {
    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
