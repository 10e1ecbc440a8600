//! Urgency classification of shortages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discrete urgency tag attached to every shortage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Low => "low",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
            AlertLevel::Critical => "critical",
        }
    }
}

impl core::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps (blocking, shortage rate %, days until required) to an alert level.
///
/// `days_to_required` may be negative when the required date has passed.
pub trait AlertClassifier {
    fn classify(&self, blocking: bool, shortage_rate: Decimal, days_to_required: i64) -> AlertLevel;
}

impl<F> AlertClassifier for F
where
    F: Fn(bool, Decimal, i64) -> AlertLevel,
{
    fn classify(
        &self,
        blocking: bool,
        shortage_rate: Decimal,
        days_to_required: i64,
    ) -> AlertLevel {
        self(blocking, shortage_rate, days_to_required)
    }
}

/// Threshold rule used when no site-specific classifier is injected.
///
/// - blocking, due within `critical_days` -> critical
/// - blocking, due within `urgent_days` or rate >= `high_rate` -> high
/// - non-blocking, same urgency test -> medium
/// - anything else -> low
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdAlertClassifier {
    pub critical_days: i64,
    pub urgent_days: i64,
    pub high_rate: Decimal,
}

impl Default for ThresholdAlertClassifier {
    fn default() -> Self {
        Self {
            critical_days: 3,
            urgent_days: 7,
            high_rate: Decimal::from(50),
        }
    }
}

impl AlertClassifier for ThresholdAlertClassifier {
    fn classify(
        &self,
        blocking: bool,
        shortage_rate: Decimal,
        days_to_required: i64,
    ) -> AlertLevel {
        let urgent = days_to_required <= self.urgent_days || shortage_rate >= self.high_rate;

        match (blocking, urgent) {
            (true, _) if days_to_required <= self.critical_days => AlertLevel::Critical,
            (true, true) => AlertLevel::High,
            (false, true) => AlertLevel::Medium,
            _ => AlertLevel::Low,
        }
    }
}
