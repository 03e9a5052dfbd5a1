//! # Portfolio validation
//!
//! Structural checks run first (headers, then each row); aggregate checks
//! (duplicates, total weight, size, unknown symbols) run over every row that
//! passed. Problems are accumulated into a [`ValidationResult`] rather than
//! returned as `Err`. Only an unreadable upload or missing required headers
//! stop a pass before rows are examined.
//!
//! ```rust,ignore
//! use folio_core::{validate_csv, ValidationConfig};
//!
//! let result = validate_csv("Ticker,Weight\nSPY,60\nBND,40\n", &ValidationConfig::default());
//! assert!(result.is_valid);
//! ```

mod aggregate;
mod config;
mod issue;
mod structural;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Asset;
use crate::parser::{decode_upload, parse_table};
use crate::symbols::partition_symbols;

pub use aggregate::{duplicate_tickers, total_weight, within_tolerance};
pub use config::{TotalWeightPolicy, ValidationConfig, TICKER_COLUMN, WEIGHT_COLUMN};
pub use issue::{Issue, IssueKind};

use structural::StructuralOutcome;

/// Assets accepted by the structural pass, with symbol classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPortfolio {
    pub assets: Vec<Asset>,
    pub total_weight: f64,
    pub known_symbols: Vec<String>,
    pub unknown_symbols: Vec<String>,
}

impl ParsedPortfolio {
    fn from_assets(assets: Vec<Asset>) -> Self {
        let (known_symbols, unknown_symbols) =
            partition_symbols(assets.iter().map(|asset| asset.ticker.as_str()));

        Self {
            total_weight: total_weight(&assets),
            assets,
            known_symbols,
            unknown_symbols,
        }
    }
}

/// Outcome class of a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Warned,
    Invalid,
}

/// Immutable result of one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_data: Option<ParsedPortfolio>,
}

impl ValidationResult {
    /// Result for input rejected before any row was examined.
    pub fn rejected(error: Issue) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
            warnings: Vec::new(),
            parsed_data: None,
        }
    }

    fn from_parts(errors: Vec<Issue>, warnings: Vec<Issue>, parsed: ParsedPortfolio) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            parsed_data: Some(parsed),
        }
    }

    pub fn status(&self) -> ValidationStatus {
        if !self.is_valid {
            ValidationStatus::Invalid
        } else if self.warnings.is_empty() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Warned
        }
    }

    pub fn assets(&self) -> &[Asset] {
        self.parsed_data
            .as_ref()
            .map(|parsed| parsed.assets.as_slice())
            .unwrap_or_default()
    }

    pub fn has_error(&self, kind: IssueKind) -> bool {
        self.errors.iter().any(|issue| issue.kind == kind)
    }

    pub fn has_warning(&self, kind: IssueKind) -> bool {
        self.warnings.iter().any(|issue| issue.kind == kind)
    }
}

/// Validates an uploaded file: name extension, UTF-8 content, then CSV rules.
pub fn validate_upload(file_name: &str, bytes: &[u8], config: &ValidationConfig) -> ValidationResult {
    if !config.accepts_file_name(file_name) {
        warn!(file_name, "rejecting upload with unsupported extension");
        return ValidationResult::rejected(
            Issue::new(IssueKind::FileType, "File must be a CSV file")
                .with_details(format!("Received: {file_name}"))
                .with_suggestion(format!(
                    "Upload a file ending in .{}",
                    config.allowed_extensions.join(" or .")
                )),
        );
    }

    match decode_upload(bytes) {
        Ok(text) => validate_csv(text, config),
        Err(error) => {
            warn!(file_name, %error, "rejecting upload that is not UTF-8 text");
            ValidationResult::rejected(
                Issue::new(IssueKind::FileType, "File could not be read as text")
                    .with_details(format!("Invalid UTF-8 at byte {}", error.valid_up_to()))
                    .with_suggestion("Save the file as UTF-8 encoded CSV and upload it again"),
            )
        }
    }
}

/// Validates comma-delimited text whose first row is the header.
pub fn validate_csv(text: &str, config: &ValidationConfig) -> ValidationResult {
    let table = parse_table(text);
    let columns = match structural::locate_columns(&table) {
        Ok(columns) => columns,
        Err(issue) => {
            warn!(headers = ?table.headers, "rejecting input without required columns");
            return ValidationResult::rejected(issue);
        }
    };

    let outcome = structural::check_records(&table, columns, config);
    debug!(
        rows = table.records.len(),
        accepted = outcome.assets.len(),
        "structural pass complete"
    );
    finish(outcome, config)
}

/// Validates an in-memory asset list (manual entry or brokerage extraction).
pub fn validate_assets(assets: &[Asset], config: &ValidationConfig) -> ValidationResult {
    let outcome = structural::check_assets(assets, config);
    debug!(
        rows = assets.len(),
        accepted = outcome.assets.len(),
        "structural pass complete"
    );
    finish(outcome, config)
}

fn finish(outcome: StructuralOutcome, config: &ValidationConfig) -> ValidationResult {
    let StructuralOutcome { assets, mut errors } = outcome;
    let parsed = ParsedPortfolio::from_assets(assets);

    let aggregate = aggregate::check_portfolio(&parsed.assets, &parsed.unknown_symbols, config);
    errors.extend(aggregate.errors);

    if parsed.assets.is_empty() && errors.is_empty() {
        errors.push(
            Issue::new(IssueKind::EmptyPortfolio, "Portfolio has no assets")
                .with_details("No rows with a ticker and weight were found")
                .with_suggestion("Add at least one ticker with a weight"),
        );
    }

    debug!(
        total_weight = parsed.total_weight,
        errors = errors.len(),
        warnings = aggregate.warnings.len(),
        "validation pass complete"
    );

    ValidationResult::from_parts(errors, aggregate.warnings, parsed)
}
