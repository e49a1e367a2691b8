use serde::{Deserialize, Serialize};
use std::fmt;

/// What a rule tells the user to do inside its price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    Buy,
    Wait,
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::Buy => write!(f, "buy"),
            RuleAction::Wait => write!(f, "wait"),
        }
    }
}

/// Trading rule derived from one price interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingRule {
    pub action: RuleAction,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Only set for buy rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    /// Percent in `[0, 100]`.
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_profit: Option<f64>,
    pub sample_size: usize,
}

impl fmt::Display for TradingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = format!("{:.2}-{:.2}", self.lower_bound, self.upper_bound);
        match self.action {
            RuleAction::Buy => {
                writeln!(f, "Buy rule: buy when price is within {}", range)?;
                if let Some(stop) = self.stop_loss {
                    writeln!(f, "  - stop loss: sell if price falls below {:.2}", stop)?;
                }
                writeln!(f, "  - target probability: {:.1}%", self.probability)?;
            }
            RuleAction::Wait => {
                writeln!(f, "Wait rule: stay on the sidelines while price is within {}", range)?;
            }
        }
        match self.avg_profit {
            Some(profit) => writeln!(f, "  - average profit: {:.2}", profit)?,
            None => writeln!(f, "  - average profit: n/a")?,
        }
        write!(f, "  - based on {} historical samples", self.sample_size)
    }
}
