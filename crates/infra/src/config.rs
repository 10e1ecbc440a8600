//! Environment overlay for [`ReadinessConfig`].

use kitready_core::{DomainError, DomainResult};
use kitready_readiness::ReadinessConfig;

pub const FALLBACK_STAGE_VAR: &str = "KITREADY_FALLBACK_STAGE";
pub const DEFAULT_DAYS_VAR: &str = "KITREADY_DEFAULT_DAYS_TO_REQUIRED";

/// Defaults overlaid with `KITREADY_*` process environment variables.
pub fn readiness_config_from_env() -> DomainResult<ReadinessConfig> {
    overlay(ReadinessConfig::default(), |key| std::env::var(key).ok())
}

/// Overlay variables resolved by `lookup` onto `base`. Blank values are ignored.
pub fn overlay(
    mut base: ReadinessConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> DomainResult<ReadinessConfig> {
    let var = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(stage) = var(FALLBACK_STAGE_VAR) {
        base.fallback_stage = stage;
    }
    if let Some(raw) = var(DEFAULT_DAYS_VAR) {
        let days: i64 = raw.parse().map_err(|_| {
            DomainError::validation(format!("{DEFAULT_DAYS_VAR} must be an integer, got {raw:?}"))
        })?;
        if days < 0 {
            return Err(DomainError::validation(format!(
                "{DEFAULT_DAYS_VAR} cannot be negative"
            )));
        }
        base.default_days_to_required = days;
    }
    Ok(base)
}
