//! Caller-owned editing session around the pure validation and transform
//! functions, plus the re-submission guard used before calling the
//! analysis service.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::AnalysisRequest;
use crate::domain::{Asset, WeightUnit};
use crate::transform::{self, PortfolioTemplate};
use crate::validation::{validate_assets, ValidationConfig, ValidationResult, ValidationStatus};
use crate::ValidationError;

/// Where a session is in the edit/validate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Only blank rows.
    Empty,
    /// Changed since the last validation.
    Editing,
    Valid,
    /// Valid with advisory warnings; still submittable.
    Warned,
    Invalid,
}

impl SessionState {
    pub const fn can_submit(self) -> bool {
        matches!(self, Self::Valid | Self::Warned)
    }
}

#[derive(Debug, Clone)]
pub struct PortfolioSession {
    assets: Vec<Asset>,
    state: SessionState,
    last_result: Option<ValidationResult>,
    config: ValidationConfig,
}

impl Default for PortfolioSession {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl PortfolioSession {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            assets: transform::clear_all(),
            state: SessionState::Empty,
            last_result: None,
            config,
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
        self.touch();
    }

    /// Removes one row. Removing the only row leaves a blank row behind.
    pub fn remove_asset(&mut self, index: usize) -> Result<Asset, ValidationError> {
        self.check_index(index)?;
        let removed = self.assets.remove(index);
        if self.assets.is_empty() {
            self.assets.push(Asset::blank());
        }
        self.touch();
        Ok(removed)
    }

    pub fn set_ticker(&mut self, index: usize, ticker: &str) -> Result<(), ValidationError> {
        self.check_index(index)?;
        let current = &self.assets[index];
        let mut updated = Asset::new(ticker, current.weight);
        updated.original_weight_text = current.original_weight_text.clone();
        self.assets[index] = updated;
        self.touch();
        Ok(())
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.assets[index] = self.assets[index].reweighted(weight);
        self.touch();
        Ok(())
    }

    pub fn replace_asset(&mut self, index: usize, asset: Asset) -> Result<(), ValidationError> {
        self.assets = transform::replace_asset(&self.assets, index, asset)?;
        self.touch();
        Ok(())
    }

    /// Replaces every row, e.g. after an upload or brokerage import.
    pub fn replace_all(&mut self, assets: Vec<Asset>) {
        self.assets = if assets.is_empty() {
            transform::clear_all()
        } else {
            assets
        };
        self.touch();
    }

    pub fn normalize(&mut self) {
        self.assets = transform::normalize_to_100(&self.assets);
        self.touch();
    }

    pub fn even_split(&mut self) {
        self.assets = transform::even_split(&self.assets);
        self.touch();
    }

    pub fn load_template(&mut self, template: PortfolioTemplate) {
        self.assets = transform::load_template(template);
        self.touch();
    }

    pub fn clear_all(&mut self) {
        self.assets = transform::clear_all();
        self.touch();
    }

    /// Runs a fresh validation pass and records its outcome.
    pub fn validate(&mut self) -> &ValidationResult {
        let result = validate_assets(&self.assets, &self.config);
        self.state = match result.status() {
            ValidationStatus::Valid => SessionState::Valid,
            ValidationStatus::Warned => SessionState::Warned,
            ValidationStatus::Invalid => SessionState::Invalid,
        };
        self.last_result.insert(result)
    }

    /// Payload for the analysis service, available only after a passing validation.
    pub fn submission(&self, unit: WeightUnit) -> Option<AnalysisRequest> {
        if !self.state.can_submit() {
            return None;
        }

        self.last_result
            .as_ref()
            .map(|result| AnalysisRequest::from_assets(result.assets(), unit))
    }

    fn touch(&mut self) {
        self.last_result = None;
        self.state = if self.assets.iter().all(Asset::is_blank) {
            SessionState::Empty
        } else {
            SessionState::Editing
        };
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.assets.len() {
            Ok(())
        } else {
            Err(ValidationError::AssetIndexOutOfBounds {
                index,
                len: self.assets.len(),
            })
        }
    }
}

/// Minimum spacing between submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPolicy {
    pub min_interval: Duration,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("submitted too recently, retry in {retry_after:?}")]
    TooSoon { retry_after: Duration },
}

/// In-flight flag plus minimum re-submit interval.
#[derive(Debug, Clone)]
pub struct SubmitGuard {
    policy: SubmitPolicy,
    in_flight: bool,
    last_started: Option<Instant>,
}

impl SubmitGuard {
    pub fn new(policy: SubmitPolicy) -> Self {
        Self {
            policy,
            in_flight: false,
            last_started: None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Claims the guard for a new submission started at `now`.
    pub fn try_begin(&mut self, now: Instant) -> Result<(), SubmitRejection> {
        if self.in_flight {
            return Err(SubmitRejection::InFlight);
        }

        if let Some(last) = self.last_started {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.policy.min_interval {
                return Err(SubmitRejection::TooSoon {
                    retry_after: self.policy.min_interval - elapsed,
                });
            }
        }

        self.in_flight = true;
        self.last_started = Some(now);
        Ok(())
    }

    /// Releases the in-flight flag whether the submission succeeded or failed.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new(SubmitPolicy::default())
    }
}
