//! # Domain Models
//!
//! Portfolio types shared by the parser, validators and transform engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Asset`] | One `(ticker, weight)` row, weight as a percentage |
//! | [`WeightUnit`] | Explicit unit tag for weights crossing the analysis boundary |
//! | [`AssetClass`] | Coarse instrument class used by ticker metadata |

mod asset;
mod units;

pub use asset::{normalize_ticker, Asset, AssetClass};
pub use units::WeightUnit;
