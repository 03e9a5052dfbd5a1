use folio_core::resolve_tickers;

use crate::cli::SymbolsArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &SymbolsArgs) -> Result<CommandResult, CliError> {
    let resolved = resolve_tickers(args.tickers.iter().map(String::as_str));
    Ok(CommandResult::ok(serde_json::to_value(resolved)?))
}
