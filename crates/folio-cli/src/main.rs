mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

/// Exit status for a portfolio that failed validation.
const VALIDATION_FAILED: u8 = 3;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<u8, CliError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let envelope = commands::run(&cli)?;
    output::render(&envelope, cli.format, cli.pretty)?;

    if cli.strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    if envelope.errors.is_empty() {
        Ok(0)
    } else {
        Ok(VALIDATION_FAILED)
    }
}
