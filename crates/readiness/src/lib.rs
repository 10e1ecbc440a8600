//! Staged kit-readiness gating.
//!
//! Given a BOM partitioned into ordered assembly stages, determine as of a
//! check date which stages have enough material to begin work. A stage is
//! startable only when every earlier stage is startable and all of its own
//! blocking lines are covered. Every stage's shortages are reported
//! regardless of gating.
//!
//! Pipeline: [`validate::validate_input`] -> [`ledger::StageLedger::init`] ->
//! [`line::analyze_line`] per BOM line -> [`gate::propagate_gates`].
//! [`ReadinessEngine`] runs the whole pipeline. The analysis is read-only.

pub mod alert;
pub mod bom;
pub mod config;
pub mod engine;
pub mod gate;
pub mod ledger;
pub mod line;
pub mod stage;
pub mod validate;

#[cfg(test)]
pub(crate) mod testkit;

pub use alert::{AlertClassifier, AlertLevel, ThresholdAlertClassifier};
pub use bom::{AssemblyAttributes, Bom, BomLineItem, Machine, Project};
pub use config::{DEFAULT_DAYS_TO_REQUIRED, DEFAULT_FALLBACK_STAGE, ReadinessConfig};
pub use engine::{ReadinessEngine, ReadinessReport, ReadinessRequest, ReadinessSources};
pub use gate::{GateOutcome, GateResult, OverallStats, completion_rate, propagate_gates};
pub use ledger::{StageCounters, StageEntry, StageLedger};
pub use line::{LineContext, ShortageRecord, analyze_line, shortage_of, shortage_rate};
pub use stage::{Stage, StageCatalog};
pub use validate::{ProjectDirectory, ValidatedInput, validate_input};
