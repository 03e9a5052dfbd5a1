use std::str::FromStr;

use folio_core::{load_template, to_csv, PortfolioTemplate, WeightUnit};
use serde_json::json;

use crate::cli::TemplateArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &TemplateArgs) -> Result<CommandResult, CliError> {
    let template = PortfolioTemplate::from_str(&args.name)?;
    let assets = load_template(template);

    Ok(CommandResult::ok(json!({
        "template": template,
        "assets": assets,
        "csv": to_csv(&assets, WeightUnit::Percentage),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_named_template() {
        let result = run(&TemplateArgs {
            name: String::from("Growth"),
        })
        .expect("template exists");

        assert_eq!(result.data["template"], "growth");
        assert_eq!(result.data["assets"][0]["ticker"], "QQQ");
    }

    #[test]
    fn unknown_template_is_a_validation_error() {
        let err = run(&TemplateArgs {
            name: String::from("yolo"),
        })
        .err()
        .expect("must fail");

        assert_eq!(err.exit_code(), 2);
    }
}
