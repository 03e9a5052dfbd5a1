use folio_core::validate_upload;

use crate::cli::FileArgs;
use crate::error::CliError;

use super::{read_input, CommandResult};

pub fn run(args: &FileArgs) -> Result<CommandResult, CliError> {
    let config = args.validation.to_config()?;
    let (file_name, bytes) = read_input(&args.path)?;

    let result = validate_upload(&file_name, &bytes, &config);
    let data = serde_json::to_value(&result)?;

    Ok(CommandResult::from_validation(data, &result))
}
