//! Conversion of linked-brokerage positions into percentage-weighted assets.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{normalize_ticker, Asset};

/// One holding as reported by a brokerage account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub ticker: String,
    #[serde(default)]
    pub units: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_type: Option<String>,
}

impl Position {
    pub fn new(ticker: impl Into<String>, units: f64, price: f64) -> Self {
        Self {
            ticker: ticker.into(),
            units,
            price,
            description: None,
            security_type: None,
        }
    }

    pub fn market_value(&self) -> f64 {
        let value = self.units * self.price;
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    fn counts_toward_total(&self) -> bool {
        self.units > 0.0 && self.price > 0.0 && self.market_value() > 0.0
    }
}

/// Assets derived from brokerage positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedHoldings {
    pub assets: Vec<Asset>,
    pub total_market_value: f64,
    pub skipped_positions: usize,
}

/// Weights each position by its share of total market value, as a percentage
/// rounded to two decimals. Positions without a ticker or without positive
/// market value are skipped. Repeated tickers are kept as separate rows.
pub fn extract_holdings(positions: &[Position]) -> ExtractedHoldings {
    let total_market_value: f64 = positions
        .iter()
        .filter(|position| position.counts_toward_total())
        .map(Position::market_value)
        .sum();

    let mut assets = Vec::with_capacity(positions.len());
    for position in positions {
        let ticker = normalize_ticker(&position.ticker);
        if ticker.is_empty() || !position.counts_toward_total() {
            continue;
        }

        let weight = round_to_hundredth(position.market_value() / total_market_value * 100.0);
        assets.push(Asset::new(&ticker, weight));
    }

    let skipped_positions = positions.len() - assets.len();
    info!(
        extracted = assets.len(),
        skipped = skipped_positions,
        total_market_value,
        "extracted brokerage holdings"
    );

    ExtractedHoldings {
        assets,
        total_market_value,
        skipped_positions,
    }
}

fn round_to_hundredth(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
