//! Weight rewrites over an asset list.
//!
//! Every operation returns a new list and never fails: degenerate input
//! (nothing to scale, nothing to split) comes back unchanged.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::Asset;
use crate::ValidationError;

const FULL_WEIGHT: f64 = 100.0;
const FULL_WEIGHT_TENTHS: u64 = 1_000;
const DRIFT_THRESHOLD: f64 = 0.0001;

/// Rounds to one decimal place, halves away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn is_scalable(asset: &Asset) -> bool {
    asset.has_ticker() && asset.weight.is_finite() && asset.weight > 0.0
}

/// Scales positive, ticker-bearing weights so they sum to exactly 100.
///
/// Each scaled weight is rounded to one decimal; whatever rounding drift
/// remains is added to the last scalable asset, spilling backwards when that
/// asset would drop below 0. Every other asset is set to 0.
pub fn normalize_to_100(assets: &[Asset]) -> Vec<Asset> {
    let valid_total: f64 = assets
        .iter()
        .filter(|asset| is_scalable(asset))
        .map(|asset| asset.weight)
        .sum();

    if valid_total == 0.0 {
        return assets.to_vec();
    }

    let factor = FULL_WEIGHT / valid_total;
    let mut normalized = assets
        .iter()
        .map(|asset| {
            if is_scalable(asset) {
                asset.reweighted(round_to_tenth(asset.weight * factor))
            } else {
                asset.reweighted(0.0)
            }
        })
        .collect::<Vec<_>>();

    let rounded_total: f64 = normalized
        .iter()
        .zip(assets)
        .filter(|(_, original)| is_scalable(original))
        .map(|(asset, _)| asset.weight)
        .sum();
    let drift = FULL_WEIGHT - rounded_total;

    if drift.abs() > DRIFT_THRESHOLD {
        absorb_drift(&mut normalized, assets, drift);
    }

    normalized
}

/// Adds `drift` to scalable assets from the end of the list. An asset that
/// would go negative is set to 0 and the remainder moves to the previous one.
fn absorb_drift(normalized: &mut [Asset], originals: &[Asset], drift: f64) {
    let mut remaining = drift;
    for index in (0..normalized.len()).rev() {
        if !is_scalable(&originals[index]) {
            continue;
        }

        let corrected = round_to_tenth(normalized[index].weight + remaining);
        debug!(ticker = %normalized[index].ticker, drift = remaining, "absorbing rounding drift");
        if corrected >= 0.0 {
            normalized[index].weight = corrected;
            return;
        }

        remaining = corrected;
        normalized[index].weight = 0.0;
    }
}

/// Gives every ticker-bearing asset an equal one-decimal share of 100.
///
/// The share is `floor(1000 / count) / 10`. When 1000 tenths do not divide
/// evenly, the last ticker-bearing asset absorbs every leftover tenth, so
/// three assets become `33.3, 33.3, 33.4`. Assets without a ticker get 0.
pub fn even_split(assets: &[Asset]) -> Vec<Asset> {
    let count = assets.iter().filter(|asset| asset.has_ticker()).count() as u64;
    if count == 0 {
        return assets.to_vec();
    }

    let base_tenths = FULL_WEIGHT_TENTHS / count;
    let leftover_tenths = FULL_WEIGHT_TENTHS - base_tenths * count;
    let last_with_ticker = assets.iter().rposition(Asset::has_ticker);

    assets
        .iter()
        .enumerate()
        .map(|(index, asset)| {
            if !asset.has_ticker() {
                return asset.reweighted(0.0);
            }

            let tenths = if Some(index) == last_with_ticker {
                base_tenths + leftover_tenths
            } else {
                base_tenths
            };
            asset.reweighted(tenths as f64 / 10.0)
        })
        .collect()
}

/// Replaces the list with a single blank row; the list is never empty.
pub fn clear_all() -> Vec<Asset> {
    vec![Asset::blank()]
}

/// Returns a copy of `assets` with the asset at `index` replaced.
pub fn replace_asset(
    assets: &[Asset],
    index: usize,
    replacement: Asset,
) -> Result<Vec<Asset>, ValidationError> {
    if index >= assets.len() {
        return Err(ValidationError::AssetIndexOutOfBounds {
            index,
            len: assets.len(),
        });
    }

    let mut replaced = assets.to_vec();
    replaced[index] = replacement;
    Ok(replaced)
}

/// Replaces the list wholesale with a template's holdings.
pub fn load_template(template: PortfolioTemplate) -> Vec<Asset> {
    info!(template = %template, "loading portfolio template");
    template
        .holdings()
        .iter()
        .map(|(ticker, weight)| Asset::new(ticker, *weight))
        .collect()
}

/// Fixed starter portfolios, each summing to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioTemplate {
    #[default]
    Balanced,
    Growth,
    Income,
}

impl PortfolioTemplate {
    pub const ALL: [Self; 3] = [Self::Balanced, Self::Growth, Self::Income];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Growth => "growth",
            Self::Income => "income",
        }
    }

    pub const fn holdings(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Balanced => &[
                ("SPY", 40.0),
                ("QQQ", 20.0),
                ("BND", 25.0),
                ("GLD", 10.0),
                ("VNQ", 5.0),
            ],
            Self::Growth => &[
                ("QQQ", 40.0),
                ("VTI", 30.0),
                ("EFA", 15.0),
                ("EEM", 10.0),
                ("IWM", 5.0),
            ],
            Self::Income => &[
                ("BND", 40.0),
                ("AGG", 20.0),
                ("VNQ", 15.0),
                ("SPY", 15.0),
                ("GLD", 10.0),
            ],
        }
    }
}

impl Display for PortfolioTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortfolioTemplate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "growth" => Ok(Self::Growth),
            "income" => Ok(Self::Income),
            other => Err(ValidationError::InvalidTemplate {
                value: other.to_owned(),
            }),
        }
    }
}
