use serde::{Deserialize, Serialize};

/// A listed instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    /// Four-digit exchange code, e.g. "2330".
    pub code: String,
    pub name: String,
    pub industry: String,
}

impl StockInfo {
    /// Label shown in pickers: "2330 - 台積電".
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}
