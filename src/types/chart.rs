use serde::{Deserialize, Serialize};

/// History range requested from the quote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "max")]
    Max,
}

impl HistoryRange {
    /// Smallest range covering `days` calendar days of history.
    pub fn covering(days: u32) -> Self {
        match days {
            0..=31 => HistoryRange::OneMonth,
            32..=93 => HistoryRange::ThreeMonths,
            94..=186 => HistoryRange::SixMonths,
            187..=366 => HistoryRange::OneYear,
            367..=731 => HistoryRange::TwoYears,
            732..=1827 => HistoryRange::FiveYears,
            1828..=3653 => HistoryRange::TenYears,
            _ => HistoryRange::Max,
        }
    }

    /// Query-string value understood by the Yahoo chart endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::TwoYears => "2y",
            HistoryRange::FiveYears => "5y",
            HistoryRange::TenYears => "10y",
            HistoryRange::Max => "max",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covering_boundaries() {
        assert_eq!(HistoryRange::covering(0), HistoryRange::OneMonth);
        assert_eq!(HistoryRange::covering(31), HistoryRange::OneMonth);
        assert_eq!(HistoryRange::covering(32), HistoryRange::ThreeMonths);
        assert_eq!(HistoryRange::covering(365), HistoryRange::OneYear);
        assert_eq!(HistoryRange::covering(1825), HistoryRange::FiveYears);
        assert_eq!(HistoryRange::covering(5000), HistoryRange::Max);
    }

    #[test]
    fn test_str_matches_serde_name() {
        for range in [
            HistoryRange::OneMonth,
            HistoryRange::OneYear,
            HistoryRange::FiveYears,
            HistoryRange::Max,
        ] {
            assert_eq!(serde_json::to_value(range).unwrap(), range.as_str());
        }
    }
}
