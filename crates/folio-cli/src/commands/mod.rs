mod correct;
mod export;
mod positions;
mod symbols;
mod template;
mod validate;

use std::fs;
use std::path::Path;
use std::time::Instant;

use folio_core::{Envelope, EnvelopeError, EnvelopeMeta, ValidationResult};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use correct::Correction;

pub const SCHEMA_VERSION: &str = "v1.0.0";

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Carries a validation pass's warnings and errors into the envelope.
    pub fn from_validation(data: Value, result: &ValidationResult) -> Self {
        Self::ok(data)
            .with_warnings(
                result
                    .warnings
                    .iter()
                    .map(|warning| format!("{}: {}", warning.kind, warning.message))
                    .collect(),
            )
            .with_errors(result.errors.iter().map(EnvelopeError::from).collect())
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Validate(args) => validate::run(args)?,
        Command::Normalize(args) => correct::run(args, Correction::Normalize)?,
        Command::EvenSplit(args) => correct::run(args, Correction::EvenSplit)?,
        Command::Template(args) => template::run(args)?,
        Command::Export(args) => export::run(args)?,
        Command::Positions(args) => positions::run(args)?,
        Command::Symbols(args) => symbols::run(args)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), SCHEMA_VERSION, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

/// Reads an input file, returning its file name and raw bytes.
pub fn read_input(path: &Path) -> Result<(String, Vec<u8>), CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok((file_name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{validate_csv, ValidationConfig};

    #[test]
    fn validation_issues_flow_into_result() {
        let result = validate_csv(
            "Ticker,Weight\nSPY,50\nspy,40\n",
            &ValidationConfig::default(),
        );
        let command = CommandResult::from_validation(Value::Null, &result);

        assert_eq!(command.errors.len(), 1);
        assert_eq!(command.errors[0].code, "duplicate-ticker");
        assert_eq!(command.warnings.len(), 1);
        assert!(command.warnings[0].starts_with("weights-not-100:"));
    }

    #[test]
    fn missing_input_reports_path() {
        let err = read_input(Path::new("/definitely/not/here.csv")).expect_err("must fail");
        assert!(matches!(err, CliError::ReadInput { .. }));
    }
}
