use serde::{Deserialize, Serialize};

use crate::ValidationError;

pub const TICKER_COLUMN: &str = "Ticker";
pub const WEIGHT_COLUMN: &str = "Weight";

/// How a total weight outside the tolerance band is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalWeightPolicy {
    /// Advisory warning; the portfolio stays valid.
    #[default]
    Warn,
    /// Blocking error.
    Strict,
}

/// Tunable limits applied by the structural and aggregate validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub min_weight: f64,
    pub max_weight: f64,
    pub target_total: f64,
    pub tolerance: f64,
    pub total_policy: TotalWeightPolicy,
    pub max_assets: usize,
    pub allowed_extensions: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_weight: 0.0,
            max_weight: 100.0,
            target_total: 100.0,
            tolerance: 0.01,
            total_policy: TotalWeightPolicy::Warn,
            max_assets: 100,
            allowed_extensions: vec![String::from("csv")],
        }
    }
}

impl ValidationConfig {
    pub fn strict() -> Self {
        Self::default().with_total_policy(TotalWeightPolicy::Strict)
    }

    pub fn with_total_policy(mut self, policy: TotalWeightPolicy) -> Self {
        self.total_policy = policy;
        self
    }

    pub fn with_weight_bounds(mut self, min_weight: f64, max_weight: f64) -> Self {
        self.min_weight = min_weight;
        self.max_weight = max_weight;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_assets(mut self, max_assets: usize) -> Self {
        self.max_assets = max_assets;
        self
    }

    /// Rejects configurations that could never be satisfied.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("min_weight", self.min_weight),
            ("max_weight", self.max_weight),
            ("target_total", self.target_total),
            ("tolerance", self.tolerance),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue { field });
            }
        }

        if self.tolerance < 0.0 {
            return Err(ValidationError::NegativeValue { field: "tolerance" });
        }

        if self.min_weight > self.max_weight {
            return Err(ValidationError::InvertedWeightBounds {
                min: self.min_weight,
                max: self.max_weight,
            });
        }

        if self.max_assets == 0 {
            return Err(ValidationError::ZeroMaxAssets);
        }

        if self.allowed_extensions.is_empty() {
            return Err(ValidationError::NoAllowedExtensions);
        }

        Ok(())
    }

    /// Case-insensitive extension check on an uploaded file name.
    pub fn accepts_file_name(&self, file_name: &str) -> bool {
        let Some((_, extension)) = file_name.trim().rsplit_once('.') else {
            return false;
        };

        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}
