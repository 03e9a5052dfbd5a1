//! Boundary with the remote analysis service.
//!
//! Whatever the input surface, a portfolio is always submitted as two-column
//! CSV text. The service's response is carried as opaque JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Asset, WeightUnit};
use crate::validation::{TICKER_COLUMN, WEIGHT_COLUMN};
use crate::CoreError;

pub const ANALYSIS_FILE_NAME: &str = "portfolio.csv";

/// Decimal places kept in written weights; enough for a two-decimal
/// percentage expressed as a fraction.
const CSV_WEIGHT_SCALE: f64 = 1_000_000.0;

/// Serializes ticker-bearing assets as `Ticker,Weight` CSV.
///
/// Asset weights are percentages; `unit` selects how they are written.
pub fn to_csv(assets: &[Asset], unit: WeightUnit) -> String {
    let mut csv = format!("{TICKER_COLUMN},{WEIGHT_COLUMN}\n");
    for asset in assets.iter().filter(|asset| asset.has_ticker()) {
        let weight = round_for_csv(WeightUnit::Percentage.convert(asset.weight, unit));
        csv.push_str(&format!("{},{weight}\n", csv_field(asset.ticker.trim())));
    }
    csv
}

fn round_for_csv(value: f64) -> f64 {
    (value * CSV_WEIGHT_SCALE).round() / CSV_WEIGHT_SCALE
}

fn csv_field(value: &str) -> String {
    let value = value.replace('"', "");
    if value.contains(',') {
        format!("\"{value}\"")
    } else {
        value
    }
}

/// File payload submitted to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub file_name: String,
    pub unit: WeightUnit,
    pub asset_count: usize,
    pub csv: String,
}

impl AnalysisRequest {
    pub fn from_assets(assets: &[Asset], unit: WeightUnit) -> Self {
        Self {
            file_name: ANALYSIS_FILE_NAME.to_owned(),
            unit,
            asset_count: assets.iter().filter(|asset| asset.has_ticker()).count(),
            csv: to_csv(assets, unit),
        }
    }
}

/// Risk metrics returned by the analysis service, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisReport(Value);

impl AnalysisReport {
    pub fn from_json(body: &str) -> Result<Self, CoreError> {
        Ok(Self(serde_json::from_str(body)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;

    #[test]
    fn writes_percentages_and_drops_blank_rows() {
        let csv = to_csv(
            &[Asset::new("SPY", 60.0), Asset::blank(), Asset::new("BND", 40.5)],
            WeightUnit::Percentage,
        );
        assert_eq!(csv, "Ticker,Weight\nSPY,60\nBND,40.5\n");
    }

    #[test]
    fn writes_fractions_when_asked() {
        let request = AnalysisRequest::from_assets(
            &[Asset::new("SPY", 75.0), Asset::new("BND", 25.0)],
            WeightUnit::Fraction,
        );

        assert_eq!(request.file_name, "portfolio.csv");
        assert_eq!(request.asset_count, 2);
        assert_eq!(request.csv, "Ticker,Weight\nSPY,0.75\nBND,0.25\n");
    }

    #[test]
    fn fractions_of_tenths_are_written_without_float_noise() {
        let split = crate::transform::even_split(&[
            Asset::new("SPY", 0.0),
            Asset::new("QQQ", 0.0),
            Asset::new("BND", 0.0),
        ]);

        let csv = to_csv(&split, WeightUnit::Fraction);
        assert_eq!(csv, "Ticker,Weight\nSPY,0.333\nQQQ,0.333\nBND,0.334\n");

        let csv = to_csv(&[Asset::new("GLD", 0.7), Asset::new("VNQ", 12.35)], WeightUnit::Fraction);
        assert_eq!(csv, "Ticker,Weight\nGLD,0.007\nVNQ,0.1235\n");
    }

    #[test]
    fn quotes_tickers_containing_commas() {
        let csv = to_csv(&[Asset::new("BRK,B", 100.0)], WeightUnit::Percentage);
        let table = parse_table(&csv);

        assert_eq!(table.records[0].fields, vec!["BRK,B", "100"]);
    }

    #[test]
    fn report_is_opaque_json() {
        let report = AnalysisReport::from_json(r#"{"volatility":0.18,"risk_analysis":{"hhi":0.2}}"#)
            .expect("report must parse");
        assert_eq!(report.as_value()["volatility"], 0.18);

        let err = AnalysisReport::from_json("not json").expect_err("must fail");
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
