//! Analysis policy knobs.

use serde::{Deserialize, Serialize};

use kitready_core::{DomainError, DomainResult};

use crate::stage::StageCatalog;

/// Stage that lines without (or with unknown) assembly attributes land in.
pub const DEFAULT_FALLBACK_STAGE: &str = "MECH";

/// Days-to-required passed to alert classification when a line has no
/// required date.
pub const DEFAULT_DAYS_TO_REQUIRED: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub fallback_stage: String,
    pub default_days_to_required: i64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            fallback_stage: DEFAULT_FALLBACK_STAGE.to_string(),
            default_days_to_required: DEFAULT_DAYS_TO_REQUIRED,
        }
    }
}

impl ReadinessConfig {
    pub fn with_fallback_stage(mut self, code: impl Into<String>) -> Self {
        self.fallback_stage = code.into();
        self
    }

    /// Check the policy against the stages it will be applied to.
    pub fn validate_against(&self, catalog: &StageCatalog) -> DomainResult<()> {
        if !catalog.contains(&self.fallback_stage) {
            return Err(DomainError::validation(format!(
                "fallback stage {} is not a known stage",
                self.fallback_stage
            )));
        }
        if self.default_days_to_required < 0 {
            return Err(DomainError::validation(
                "default_days_to_required cannot be negative",
            ));
        }
        Ok(())
    }
}
