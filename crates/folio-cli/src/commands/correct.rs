use folio_core::{
    even_split, normalize_to_100, to_csv, validate_assets, validate_upload, WeightUnit,
};
use serde_json::json;
use tracing::debug;

use crate::cli::FileArgs;
use crate::error::CliError;

use super::{read_input, CommandResult};

/// Weight correction applied to an uploaded portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    Normalize,
    EvenSplit,
}

impl Correction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::EvenSplit => "even-split",
        }
    }
}

/// Validates the upload, applies the correction, then re-validates.
///
/// Uploads with row-level errors are returned uncorrected: correcting would
/// silently drop the rejected rows.
pub fn run(args: &FileArgs, correction: Correction) -> Result<CommandResult, CliError> {
    let config = args.validation.to_config()?;
    let (file_name, bytes) = read_input(&args.path)?;

    let initial = validate_upload(&file_name, &bytes, &config);
    let blocked = initial.errors.iter().any(|error| error.kind.is_structural());
    if blocked || initial.parsed_data.is_none() {
        let data = serde_json::to_value(&initial)?;
        return Ok(CommandResult::from_validation(data, &initial)
            .with_warning("correction skipped: fix row errors first"));
    }

    let corrected = match correction {
        Correction::Normalize => normalize_to_100(initial.assets()),
        Correction::EvenSplit => even_split(initial.assets()),
    };
    debug!(correction = correction.as_str(), assets = corrected.len(), "applied correction");

    let revalidated = validate_assets(&corrected, &config);
    let data = json!({
        "correction": correction.as_str(),
        "assets": corrected,
        "csv": to_csv(&corrected, WeightUnit::Percentage),
        "validation": revalidated,
    });

    Ok(CommandResult::from_validation(data, &revalidated))
}
