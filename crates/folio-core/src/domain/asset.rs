use serde::{Deserialize, Serialize};

/// Coarse instrument class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Equity,
    Etf,
    Crypto,
    Unknown,
}

impl AssetClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Etf => "etf",
            Self::Crypto => "crypto",
            Self::Unknown => "unknown",
        }
    }
}

/// One portfolio row. `weight` is a percentage in `[0, 100]`.
///
/// The ticker may be empty: an empty-ticker, zero-weight asset is the blank
/// placeholder row that keeps an input list from ever being zero-length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub ticker: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_weight_text: Option<String>,
}

impl Asset {
    /// Builds an asset with its ticker trimmed and uppercased.
    pub fn new(ticker: &str, weight: f64) -> Self {
        Self {
            ticker: normalize_ticker(ticker),
            weight,
            original_weight_text: None,
        }
    }

    pub fn blank() -> Self {
        Self::new("", 0.0)
    }

    pub fn with_original_weight_text(mut self, text: impl Into<String>) -> Self {
        self.original_weight_text = Some(text.into());
        self
    }

    pub fn has_ticker(&self) -> bool {
        !self.ticker.trim().is_empty()
    }

    pub fn is_blank(&self) -> bool {
        !self.has_ticker() && self.weight == 0.0
    }

    /// Returns a copy with a new weight. The original weight text no longer
    /// describes the value, so it is dropped.
    pub fn reweighted(&self, weight: f64) -> Self {
        Self {
            ticker: self.ticker.clone(),
            weight,
            original_weight_text: None,
        }
    }
}

impl Default for Asset {
    fn default() -> Self {
        Self::blank()
    }
}

/// Case-normalizes a raw ticker: surrounding whitespace removed, ASCII uppercase.
pub fn normalize_ticker(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}
