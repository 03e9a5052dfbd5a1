//! CLI argument definitions for folio.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `validate` | Validate a portfolio CSV file |
//! | `normalize` | Scale weights to exactly 100% |
//! | `even-split` | Give every ticker an equal share |
//! | `template` | Print a starter portfolio |
//! | `export` | Build the analysis-service payload |
//! | `positions` | Convert brokerage positions to a portfolio |
//! | `symbols` | Resolve ticker metadata |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! folio validate holdings.csv --pretty
//! folio normalize holdings.csv --format table
//! folio export holdings.csv --unit fraction
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use folio_core::{TotalWeightPolicy, ValidationConfig, ValidationError};

/// Portfolio validation and weight tools.
#[derive(Debug, Parser)]
#[command(
    name = "folio",
    author,
    version,
    about = "Portfolio validation and weight-normalization tools",
    long_about = "folio checks (ticker, weight) portfolios before they are sent for risk \
analysis. It reports blocking errors and advisory warnings, and can normalize weights, \
split them evenly, or build the CSV payload the analysis service expects.\n\
\n\
Use 'folio <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Emit debug logs on stderr. Otherwise FOLIO_LOG controls the filter.
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Human-readable summary.
    Table,
}

/// Weight unit written by `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitSelector {
    Percentage,
    Fraction,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a portfolio CSV file.
    ///
    /// # Examples
    ///
    ///   folio validate holdings.csv
    ///   folio validate holdings.csv --strict-total --max-assets 50
    Validate(FileArgs),

    /// Scale positive weights so they sum to exactly 100.
    Normalize(FileArgs),

    /// Replace weights with an equal one-decimal share per ticker.
    EvenSplit(FileArgs),

    /// Print a built-in starter portfolio.
    Template(TemplateArgs),

    /// Validate a file and print the payload submitted for analysis.
    Export(ExportArgs),

    /// Convert a JSON array of brokerage positions into a portfolio.
    Positions(FileArgs),

    /// Resolve display metadata for tickers.
    Symbols(SymbolsArgs),
}

/// Validation limits shared by every command that validates.
#[derive(Debug, Clone, Args)]
pub struct ValidationArgs {
    /// Report totals away from 100% as errors instead of warnings.
    #[arg(long, default_value_t = false)]
    pub strict_total: bool,

    /// Warn when a portfolio holds more assets than this.
    #[arg(long, default_value_t = 100)]
    pub max_assets: usize,

    /// Lowest accepted per-asset weight, in percent.
    #[arg(long, default_value_t = 0.0)]
    pub min_weight: f64,

    /// Highest accepted per-asset weight, in percent.
    #[arg(long, default_value_t = 100.0)]
    pub max_weight: f64,

    /// Distance from 100% still treated as exactly 100%.
    #[arg(long, default_value_t = 0.01)]
    pub tolerance: f64,
}

impl ValidationArgs {
    pub fn to_config(&self) -> Result<ValidationConfig, ValidationError> {
        let policy = if self.strict_total {
            TotalWeightPolicy::Strict
        } else {
            TotalWeightPolicy::Warn
        };

        let config = ValidationConfig::default()
            .with_total_policy(policy)
            .with_max_assets(self.max_assets)
            .with_weight_bounds(self.min_weight, self.max_weight)
            .with_tolerance(self.tolerance);
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for commands that read one input file.
#[derive(Debug, Args)]
pub struct FileArgs {
    /// Path to the input file.
    pub path: PathBuf,

    #[command(flatten)]
    pub validation: ValidationArgs,
}

/// Arguments for the `template` command.
#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template name: balanced, growth or income.
    #[arg(long, default_value = "balanced")]
    pub name: String,
}

/// Arguments for the `export` command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Unit the exported weights are written in.
    #[arg(long, value_enum, default_value_t = UnitSelector::Fraction)]
    pub unit: UnitSelector,
}

/// Arguments for the `symbols` command.
#[derive(Debug, Args)]
pub struct SymbolsArgs {
    /// One or more tickers.
    #[arg(required = true, num_args = 1..)]
    pub tickers: Vec<String>,
}
