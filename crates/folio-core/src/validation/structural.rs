//! Row-level checks. Every violated row yields exactly one error and scanning
//! continues, so a single pass reports the complete list.

use crate::domain::Asset;
use crate::parser::{Record, Table};

use super::config::{ValidationConfig, TICKER_COLUMN, WEIGHT_COLUMN};
use super::issue::{Issue, IssueKind};

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Columns {
    pub ticker: usize,
    pub weight: usize,
}

impl Columns {
    fn min_fields(self) -> usize {
        (self.ticker.max(self.weight) + 1).max(2)
    }
}

#[derive(Debug, Default)]
pub(crate) struct StructuralOutcome {
    pub assets: Vec<Asset>,
    pub errors: Vec<Issue>,
}

/// Locates both required columns by name, or produces the single
/// `missing-headers` error covering everything that is absent.
pub(crate) fn locate_columns(table: &Table) -> Result<Columns, Issue> {
    let ticker = table.column(TICKER_COLUMN);
    let weight = table.column(WEIGHT_COLUMN);

    if let (Some(ticker), Some(weight)) = (ticker, weight) {
        return Ok(Columns { ticker, weight });
    }

    let missing = [(TICKER_COLUMN, ticker), (WEIGHT_COLUMN, weight)]
        .iter()
        .filter(|(_, position)| position.is_none())
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();

    let found = if table.headers.iter().all(|header| header.is_empty()) {
        String::from("Found columns: none")
    } else {
        format!("Found columns: {}", table.headers.join(", "))
    };

    Err(Issue::new(
        IssueKind::MissingHeaders,
        format!("Missing required columns: {}", missing.join(", ")),
    )
    .with_details(found)
    .with_suggestion(format!(
        "The first row must name the {TICKER_COLUMN} and {WEIGHT_COLUMN} columns"
    )))
}

pub(crate) fn check_records(
    table: &Table,
    columns: Columns,
    config: &ValidationConfig,
) -> StructuralOutcome {
    let mut outcome = StructuralOutcome::default();

    for record in &table.records {
        match check_record(record, columns, config) {
            Ok(asset) => outcome.assets.push(asset),
            Err(issue) => outcome.errors.push(issue),
        }
    }

    outcome
}

fn check_record(
    record: &Record,
    columns: Columns,
    config: &ValidationConfig,
) -> Result<Asset, Issue> {
    let row = record.line;

    if record.fields.len() < columns.min_fields() {
        return Err(Issue::new(
            IssueKind::MalformedRow,
            format!(
                "Row {row} has {} field(s); expected a ticker and a weight",
                record.fields.len()
            ),
        )
        .with_details(format!("Row content: {}", record.fields.join(",")))
        .with_suggestion("Each row needs a ticker and a weight separated by a comma"));
    }

    let ticker = record.fields[columns.ticker].as_str();
    let weight_text = record.fields[columns.weight].as_str();

    if ticker.is_empty() {
        return Err(missing_ticker(row, weight_text));
    }

    let weight = parse_weight(weight_text).ok_or_else(|| {
        Issue::new(
            IssueKind::MalformedRow,
            format!("Row {row} has an invalid weight for {}", ticker.to_ascii_uppercase()),
        )
        .with_details(format!("'{weight_text}' is not a number"))
        .with_suggestion("Use a plain decimal percentage such as 25 or 12.5")
    })?;

    check_bounds(row, ticker, weight, config)?;

    Ok(Asset::new(ticker, weight).with_original_weight_text(weight_text))
}

/// Structural checks for in-memory assets. Blank placeholder rows are skipped.
pub(crate) fn check_assets(assets: &[Asset], config: &ValidationConfig) -> StructuralOutcome {
    let mut outcome = StructuralOutcome::default();

    for (index, asset) in assets.iter().enumerate() {
        if asset.is_blank() {
            continue;
        }

        let row = index + 1;
        let checked = if !asset.has_ticker() {
            Err(missing_ticker(row, &asset.weight.to_string()))
        } else if !asset.weight.is_finite() {
            Err(Issue::new(
                IssueKind::MalformedRow,
                format!("Row {row} has an invalid weight for {}", asset.ticker.trim()),
            )
            .with_details(format!("'{}' is not a finite number", asset.weight))
            .with_suggestion("Use a plain decimal percentage such as 25 or 12.5"))
        } else {
            check_bounds(row, &asset.ticker, asset.weight, config).map(|()| {
                let mut normalized = Asset::new(&asset.ticker, asset.weight);
                normalized.original_weight_text = asset.original_weight_text.clone();
                normalized
            })
        };

        match checked {
            Ok(asset) => outcome.assets.push(asset),
            Err(issue) => outcome.errors.push(issue),
        }
    }

    outcome
}

fn parse_weight(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|weight| weight.is_finite())
}

fn missing_ticker(row: usize, weight_text: &str) -> Issue {
    Issue::new(IssueKind::MalformedRow, format!("Row {row} is missing a ticker"))
        .with_details(format!("Weight on this row: {weight_text}"))
        .with_suggestion("Enter a ticker symbol such as SPY or AAPL")
}

fn check_bounds(
    row: usize,
    ticker: &str,
    weight: f64,
    config: &ValidationConfig,
) -> Result<(), Issue> {
    if weight >= config.min_weight && weight <= config.max_weight {
        return Ok(());
    }

    Err(Issue::new(
        IssueKind::OutOfRangeWeight,
        format!(
            "Row {row} weight for {} is outside {}-{}",
            ticker.trim().to_ascii_uppercase(),
            config.min_weight,
            config.max_weight
        ),
    )
    .with_details(format!("Weight: {weight}"))
    .with_suggestion(format!(
        "Weights are percentages between {} and {}",
        config.min_weight, config.max_weight
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;

    fn run(text: &str) -> StructuralOutcome {
        let table = parse_table(text);
        let columns = locate_columns(&table).expect("headers must be present");
        check_records(&table, columns, &ValidationConfig::default())
    }

    #[test]
    fn locates_columns_by_name_in_any_order() {
        let table = parse_table("weight,Notes,TICKER\n");
        let columns = locate_columns(&table).expect("must locate");
        assert_eq!(columns, Columns { ticker: 2, weight: 0 });
    }

    #[test]
    fn one_error_lists_every_missing_column() {
        let table = parse_table("Symbol,Percentage\nSPY,100\n");
        let issue = locate_columns(&table).expect_err("must fail");

        assert_eq!(issue.kind, IssueKind::MissingHeaders);
        assert!(issue.message.contains("Ticker"));
        assert!(issue.message.contains("Weight"));
        assert_eq!(issue.details.as_deref(), Some("Found columns: Symbol, Percentage"));
    }

    #[test]
    fn accumulates_one_error_per_bad_row() {
        let outcome = run("Ticker,Weight\nSPY\n,20\nQQQ,abc\nBND,120\nGLD,10\n");

        assert_eq!(outcome.errors.len(), 4);
        assert_eq!(outcome.assets.len(), 1);
        assert_eq!(outcome.assets[0].ticker, "GLD");

        let kinds = outcome.errors.iter().map(|e| e.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                IssueKind::MalformedRow,
                IssueKind::MalformedRow,
                IssueKind::MalformedRow,
                IssueKind::OutOfRangeWeight
            ]
        );
    }

    #[test]
    fn reports_offending_literal_for_non_numeric_weight() {
        let outcome = run("Ticker,Weight\nQQQ,12%\n");
        let issue = &outcome.errors[0];

        assert_eq!(issue.message, "Row 2 has an invalid weight for QQQ");
        assert_eq!(issue.details.as_deref(), Some("'12%' is not a number"));
    }

    #[test]
    fn rejects_non_finite_literals() {
        let outcome = run("Ticker,Weight\nSPY,inf\nQQQ,NaN\n");
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.assets.is_empty());
    }

    #[test]
    fn keeps_original_weight_text() {
        let outcome = run("Ticker,Weight\nspy,60.50\n");
        let asset = &outcome.assets[0];

        assert_eq!(asset.ticker, "SPY");
        assert_eq!(asset.weight, 60.5);
        assert_eq!(asset.original_weight_text.as_deref(), Some("60.50"));
    }

    #[test]
    fn in_memory_assets_skip_blank_rows() {
        let assets = vec![
            Asset::new("spy", 50.0),
            Asset::blank(),
            Asset::new("", 10.0),
            Asset::new("QQQ", f64::NAN),
        ];
        let outcome = check_assets(&assets, &ValidationConfig::default());

        assert_eq!(outcome.assets, vec![Asset::new("SPY", 50.0)]);
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.errors[0].message, "Row 3 is missing a ticker");
    }
}
