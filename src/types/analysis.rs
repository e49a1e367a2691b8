use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// How prominently a signal should be shown. Serialized as its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Importance {
    Info,
    Warning,
}

impl Importance {
    /// Numeric level: 1 = info, 2 = warning.
    pub fn level(&self) -> u8 {
        match self {
            Importance::Info => 1,
            Importance::Warning => 2,
        }
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.level()
    }
}

impl TryFrom<u8> for Importance {
    type Error = AnalysisError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Importance::Info),
            2 => Ok(Importance::Warning),
            other => Err(AnalysisError::InvalidParameter(format!("importance level {}", other))),
        }
    }
}

/// Coarse risk classification of an analysis run. Serialized as its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Numeric level: 0 = low, 1 = medium, 2 = high.
    pub fn level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }
}

impl From<RiskLevel> for u8 {
    fn from(value: RiskLevel) -> Self {
        value.level()
    }
}

impl TryFrom<u8> for RiskLevel {
    type Error = AnalysisError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(RiskLevel::Low),
            1 => Ok(RiskLevel::Medium),
            2 => Ok(RiskLevel::High),
            other => Err(AnalysisError::InvalidParameter(format!("risk level {}", other))),
        }
    }
}

/// A single human-readable observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub message: String,
    pub importance: Importance,
}

impl Signal {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            importance: Importance::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            importance: Importance::Warning,
        }
    }
}

/// Ordered signals plus the running maximum risk level.
///
/// Signals keep emission order and are not deduplicated. The risk level
/// only ever rises.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    signals: Vec<Signal>,
    risk_level: RiskLevel,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signal.
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// Raise the risk level to at least `level`.
    pub fn with_risk_at_least(mut self, level: RiskLevel) -> Self {
        self.risk_level = self.risk_level.max(level);
        self
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.signals.iter().map(|s| s.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_is_monotone() {
        let result = AnalysisResult::new()
            .with_risk_at_least(RiskLevel::High)
            .with_risk_at_least(RiskLevel::Low)
            .with_risk_at_least(RiskLevel::Medium);
        assert_eq!(result.risk_level(), RiskLevel::High);
        assert_eq!(result.risk_level().level(), 2);
    }

    #[test]
    fn test_signals_keep_order_and_duplicates() {
        let result = AnalysisResult::new()
            .with_signal(Signal::info("a"))
            .with_signal(Signal::warning("b"))
            .with_signal(Signal::info("a"));
        let messages: Vec<&str> = result.messages().collect();
        assert_eq!(messages, vec!["a", "b", "a"]);
        assert_eq!(result.signals()[1].importance.level(), 2);
    }

    #[test]
    fn test_serialization_shape() {
        let result = AnalysisResult::new()
            .with_signal(Signal::warning("careful"))
            .with_risk_at_least(RiskLevel::Medium);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"signals":[{"message":"careful","importance":2}],"riskLevel":1}"#
        );
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_unknown_levels_rejected() {
        assert!(serde_json::from_str::<Importance>("0").is_err());
        assert!(serde_json::from_str::<RiskLevel>("3").is_err());
        assert_eq!(serde_json::from_str::<RiskLevel>("2").unwrap(), RiskLevel::High);
    }
}
