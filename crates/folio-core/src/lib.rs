//! Core contracts for folio.
//!
//! This crate contains:
//! - Portfolio domain models and weight units
//! - Comma-delimited parsing of uploaded portfolios
//! - Structural and aggregate validation with accumulated errors/warnings
//! - Weight transforms (normalize, even split, templates, clear)
//! - Editing session, submit guard and the analysis-service boundary
//! - Brokerage position extraction and ticker metadata

pub mod analysis;
pub mod brokerage;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod parser;
pub mod session;
pub mod symbols;
pub mod transform;
pub mod validation;

pub use analysis::{to_csv, AnalysisReport, AnalysisRequest, ANALYSIS_FILE_NAME};
pub use brokerage::{extract_holdings, ExtractedHoldings, Position};
pub use domain::{normalize_ticker, Asset, AssetClass, WeightUnit};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use parser::{parse_table, split_fields, Record, Table};
pub use session::{PortfolioSession, SessionState, SubmitGuard, SubmitPolicy, SubmitRejection};
pub use symbols::{classify, is_known_symbol, resolve_tickers, TickerMetadata};
pub use transform::{
    clear_all, even_split, load_template, normalize_to_100, replace_asset, round_to_tenth,
    PortfolioTemplate,
};
pub use validation::{
    duplicate_tickers, total_weight, validate_assets, validate_csv, validate_upload, Issue,
    IssueKind, ParsedPortfolio, TotalWeightPolicy, ValidationConfig, ValidationResult,
    ValidationStatus,
};
