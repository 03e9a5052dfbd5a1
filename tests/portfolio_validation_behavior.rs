//! Behavior-driven tests for portfolio validation
//!
//! These tests verify WHAT a user learns about an uploaded or typed-in
//! portfolio: which problems block submission, which are advisory, and that
//! the verdict does not depend on row order.

use folio_core::{
    validate_assets, validate_csv, validate_upload, Asset, IssueKind, ValidationConfig,
    ValidationStatus,
};

fn sorted_kinds(issues: &[folio_core::Issue]) -> Vec<IssueKind> {
    let mut kinds = issues.iter().map(|issue| issue.kind).collect::<Vec<_>>();
    kinds.sort();
    kinds
}

// =============================================================================
// Headers and file type
// =============================================================================

#[test]
fn when_required_headers_are_missing_user_gets_one_error_naming_both() {
    // Given: A file using the wrong column names
    let csv = "Symbol,Percentage\nSPY,60\nBND,abc\n";

    // When: It is validated
    let result = validate_csv(csv, &ValidationConfig::default());

    // Then: Exactly one missing-headers error lists both names and no rows were read
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.kind, IssueKind::MissingHeaders);
    assert!(error.message.contains("Ticker") && error.message.contains("Weight"));
    assert!(error.suggestion.is_some(), "error should suggest a fix");
    assert!(result.parsed_data.is_none());
}

#[test]
fn when_headers_use_other_case_and_order_file_is_accepted() {
    // Given: Headers in reverse order and lower case
    let csv = "weight,ticker\n60,spy\n40,bnd\n";

    // When: It is validated
    let result = validate_csv(csv, &ValidationConfig::default());

    // Then: Columns are matched by name
    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    assert_eq!(result.assets()[0].ticker, "SPY");
    assert_eq!(result.assets()[1].weight, 40.0);
}

#[test]
fn when_upload_is_not_a_csv_user_gets_file_type_error() {
    let result = validate_upload("portfolio.xlsx", b"PK\x03\x04", &ValidationConfig::default());

    assert_eq!(sorted_kinds(&result.errors), vec![IssueKind::FileType]);
    assert!(result.warnings.is_empty());
}

// =============================================================================
// Row-level errors
// =============================================================================

#[test]
fn when_several_rows_are_broken_user_sees_all_of_them_in_one_pass() {
    // Given: A file with one good row and three different row problems
    let csv = "Ticker,Weight\nSPY,50\n,10\nQQQ,lots\nTLT,150\n";

    // When: It is validated
    let result = validate_csv(csv, &ValidationConfig::default());

    // Then: Every broken row is reported and the good row is kept
    assert!(!result.is_valid);
    assert_eq!(
        sorted_kinds(&result.errors),
        vec![
            IssueKind::MalformedRow,
            IssueKind::MalformedRow,
            IssueKind::OutOfRangeWeight
        ]
    );
    assert_eq!(result.assets().len(), 1);

    // And: The non-numeric value is quoted back to the user
    assert!(result
        .errors
        .iter()
        .any(|error| error.details.as_deref() == Some("'lots' is not a number")));
}

#[test]
fn blank_lines_between_rows_are_ignored() {
    let result = validate_csv("Ticker,Weight\n\nSPY,100\n   \n", &ValidationConfig::default());

    assert!(result.is_valid);
    assert_eq!(result.assets().len(), 1);
}

#[test]
fn custom_bounds_apply_to_each_asset() {
    let config = ValidationConfig::default().with_weight_bounds(1.0, 50.0);
    let result = validate_csv("Ticker,Weight\nSPY,60\nBND,0.5\n", &config);

    assert_eq!(
        sorted_kinds(&result.errors),
        vec![IssueKind::OutOfRangeWeight, IssueKind::OutOfRangeWeight]
    );
}

// =============================================================================
// Aggregate checks
// =============================================================================

#[test]
fn when_ticker_repeats_in_different_case_one_duplicate_error_is_reported() {
    // Given: The same ticker twice in different case
    let assets = vec![Asset::new("AAPL", 50.0), Asset::new("aapl", 50.0)];

    // When: The assets are validated
    let result = validate_assets(&assets, &ValidationConfig::default());

    // Then: Exactly one duplicate error names AAPL
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, IssueKind::DuplicateTicker);
    assert!(result.errors[0].message.contains("AAPL"));
}

#[test]
fn total_within_tolerance_counts_as_100() {
    let result = validate_csv("Ticker,Weight\nSPY,60\nBND,39.995\n", &ValidationConfig::default());

    assert!(result.is_valid);
    assert!(!result.has_warning(IssueKind::WeightsNot100));
    assert_eq!(result.status(), ValidationStatus::Valid);
}

#[test]
fn total_just_outside_tolerance_warns_but_stays_valid() {
    let result = validate_csv("Ticker,Weight\nSPY,60\nBND,39.98\n", &ValidationConfig::default());

    assert!(result.is_valid);
    assert!(result.has_warning(IssueKind::WeightsNot100));
    assert_eq!(result.status(), ValidationStatus::Warned);
}

#[test]
fn strict_mode_blocks_totals_outside_tolerance() {
    let result = validate_csv("Ticker,Weight\nSPY,60\nBND,39.98\n", &ValidationConfig::strict());

    assert!(!result.is_valid);
    assert!(result.has_error(IssueKind::WeightsNot100));
}

#[test]
fn unknown_symbols_are_flagged_but_kept() {
    let result = validate_csv("Ticker,Weight\nSPY,50\nMYCO,50\n", &ValidationConfig::default());
    let parsed = result.parsed_data.as_ref().expect("parsed data");

    assert!(result.is_valid);
    assert!(result.has_warning(IssueKind::UnknownSymbols));
    assert_eq!(parsed.unknown_symbols, vec!["MYCO"]);
    assert_eq!(parsed.assets.len(), 2);
}

#[test]
fn oversized_portfolio_warns() {
    let config = ValidationConfig::default().with_max_assets(3);
    let assets = ["SPY", "QQQ", "BND", "GLD"]
        .iter()
        .map(|ticker| Asset::new(ticker, 25.0))
        .collect::<Vec<_>>();

    let result = validate_assets(&assets, &config);

    assert!(result.is_valid);
    assert!(result.has_warning(IssueKind::LargePortfolio));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn permuting_rows_does_not_change_the_verdict() {
    // Given: The same rows in two different orders
    let rows = [
        ("SPY", 33.3),
        ("qqq", 0.1),
        ("MYCO", 20.0),
        ("BND", 46.58),
        ("spy", 0.01),
    ];
    let forward = rows
        .iter()
        .map(|(ticker, weight)| Asset::new(ticker, *weight))
        .collect::<Vec<_>>();
    let mut reversed = forward.clone();
    reversed.reverse();

    // When: Both are validated
    let config = ValidationConfig::default();
    let a = validate_assets(&forward, &config);
    let b = validate_assets(&reversed, &config);

    // Then: Validity, totals and the issue set are identical
    assert_eq!(a.is_valid, b.is_valid);
    assert_eq!(a.errors, b.errors);
    assert_eq!(a.warnings, b.warnings);
    let total_a = a.parsed_data.as_ref().expect("parsed").total_weight;
    let total_b = b.parsed_data.as_ref().expect("parsed").total_weight;
    assert_eq!(total_a.to_bits(), total_b.to_bits());
}

#[test]
fn total_weight_equals_sum_of_parsed_assets() {
    let result = validate_csv(
        "Ticker,Weight\nSPY,12.5\nQQQ,30\nBND,20.25\nGLD,7\n",
        &ValidationConfig::default(),
    );
    let parsed = result.parsed_data.expect("parsed data");
    let sum: f64 = parsed.assets.iter().map(|asset| asset.weight).sum();

    assert!((parsed.total_weight - sum).abs() < 1e-9);
}
