use folio_core::{validate_upload, AnalysisRequest, WeightUnit};

use crate::cli::{ExportArgs, UnitSelector};
use crate::error::CliError;

use super::{read_input, CommandResult};

pub fn run(args: &ExportArgs) -> Result<CommandResult, CliError> {
    let config = args.input.validation.to_config()?;
    let (file_name, bytes) = read_input(&args.input.path)?;

    let result = validate_upload(&file_name, &bytes, &config);
    if !result.is_valid {
        let data = serde_json::to_value(&result)?;
        return Ok(CommandResult::from_validation(data, &result));
    }

    let unit = match args.unit {
        UnitSelector::Percentage => WeightUnit::Percentage,
        UnitSelector::Fraction => WeightUnit::Fraction,
    };
    let request = AnalysisRequest::from_assets(result.assets(), unit);

    Ok(CommandResult::from_validation(
        serde_json::to_value(&request)?,
        &result,
    ))
}
