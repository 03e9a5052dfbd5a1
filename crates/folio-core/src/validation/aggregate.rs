//! Whole-portfolio checks run over the structurally accepted assets.
//!
//! Results never depend on asset order: totals are summed in a canonical
//! order and ticker lists inside messages are sorted.

use std::collections::BTreeMap;

use crate::domain::{normalize_ticker, Asset};

use super::config::{TotalWeightPolicy, ValidationConfig};
use super::issue::{Issue, IssueKind};

/// Slack added to the tolerance so the band edge itself counts as inside.
const TOLERANCE_EPSILON: f64 = 1e-9;

#[derive(Debug, Default)]
pub(crate) struct AggregateOutcome {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

pub(crate) fn check_portfolio(
    assets: &[Asset],
    unknown_symbols: &[String],
    config: &ValidationConfig,
) -> AggregateOutcome {
    let mut outcome = AggregateOutcome::default();

    let duplicates = duplicate_tickers(assets);
    if !duplicates.is_empty() {
        outcome.errors.push(
            Issue::new(
                IssueKind::DuplicateTicker,
                format!("Duplicate tickers found: {}", duplicates.join(", ")),
            )
            .with_details(format!("{} ticker(s) appear more than once", duplicates.len()))
            .with_suggestion("Combine the weights of each duplicated ticker into a single row"),
        );
    }

    if !assets.is_empty() {
        let total = total_weight(assets);
        if !within_tolerance(total, config) {
            let issue = total_weight_issue(total, config);
            match config.total_policy {
                TotalWeightPolicy::Warn => outcome.warnings.push(issue),
                TotalWeightPolicy::Strict => outcome.errors.push(issue),
            }
        }
    }

    if assets.len() > config.max_assets {
        outcome.warnings.push(
            Issue::new(
                IssueKind::LargePortfolio,
                format!("Portfolio has {} assets", assets.len()),
            )
            .with_details(format!(
                "More than {} assets may slow down the analysis",
                config.max_assets
            ))
            .with_suggestion("Consider consolidating small positions"),
        );
    }

    if !unknown_symbols.is_empty() {
        let mut listed = unknown_symbols.to_vec();
        listed.sort();
        listed.dedup();
        outcome.warnings.push(
            Issue::new(
                IssueKind::UnknownSymbols,
                format!("Unrecognized symbols: {}", listed.join(", ")),
            )
            .with_details(format!(
                "{} symbol(s) are not in the reference list and may lack market data",
                listed.len()
            ))
            .with_suggestion("Double-check these tickers for typos"),
        );
    }

    outcome
}

/// Sum of all weights, independent of the order of `assets`.
pub fn total_weight(assets: &[Asset]) -> f64 {
    let mut weights = assets.iter().map(|asset| asset.weight).collect::<Vec<_>>();
    weights.sort_by(f64::total_cmp);
    weights.iter().sum()
}

/// Normalized tickers that appear more than once, sorted.
pub fn duplicate_tickers(assets: &[Asset]) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for asset in assets.iter().filter(|asset| asset.has_ticker()) {
        *counts.entry(normalize_ticker(&asset.ticker)).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(ticker, _)| ticker)
        .collect()
}

pub fn within_tolerance(total: f64, config: &ValidationConfig) -> bool {
    (total - config.target_total).abs() <= config.tolerance + TOLERANCE_EPSILON
}

fn total_weight_issue(total: f64, config: &ValidationConfig) -> Issue {
    let target = config.target_total;
    let suggestion = if total < target {
        format!("Add more assets or increase weights to reach {target}%")
    } else {
        format!("Reduce some weights to reach {target}%")
    };

    Issue::new(
        IssueKind::WeightsNot100,
        format!("Weights sum to {total:.2}% instead of {target}%"),
    )
    .with_details(format!("Total: {total:.2}%"))
    .with_suggestion(suggestion)
}
