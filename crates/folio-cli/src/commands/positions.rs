use folio_core::{extract_holdings, validate_assets, Position};
use serde_json::json;

use crate::cli::FileArgs;
use crate::error::CliError;

use super::{read_input, CommandResult};

/// Reads a JSON array of brokerage positions and validates the derived portfolio.
pub fn run(args: &FileArgs) -> Result<CommandResult, CliError> {
    let config = args.validation.to_config()?;
    let (_, bytes) = read_input(&args.path)?;

    let positions: Vec<Position> = serde_json::from_slice(&bytes)?;
    let holdings = extract_holdings(&positions);
    let result = validate_assets(&holdings.assets, &config);

    let mut command = CommandResult::from_validation(
        json!({
            "holdings": holdings,
            "validation": result,
        }),
        &result,
    );
    if holdings.skipped_positions > 0 {
        command = command.with_warning(format!(
            "skipped {} position(s) without a ticker or positive market value",
            holdings.skipped_positions
        ));
    }

    Ok(command)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::cli::ValidationArgs;

    #[test]
    fn converts_positions_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"ticker":"vti","units":3,"price":100}},{{"ticker":"bnd","units":2,"price":50}},{{"ticker":"","units":1,"price":0}}]"#
        )
        .expect("write");

        let args = FileArgs {
            path: file.path().to_path_buf(),
            validation: ValidationArgs {
                strict_total: false,
                max_assets: 100,
                min_weight: 0.0,
                max_weight: 100.0,
                tolerance: 0.01,
            },
        };
        let result = run(&args).expect("command runs");

        assert!(result.errors.is_empty());
        assert_eq!(result.data["holdings"]["assets"][0]["weight"], 75.0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let args = FileArgs {
            path: file.path().to_path_buf(),
            validation: ValidationArgs {
                strict_total: false,
                max_assets: 100,
                min_weight: 0.0,
                max_weight: 100.0,
                tolerance: 0.01,
            },
        };
        let err = run(&args).err().expect("must fail");

        assert!(matches!(err, CliError::Serialization(_)));
    }
}
