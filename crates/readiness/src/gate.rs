//! Sequential stage gating over fully accumulated stage counters.
//!
//! Stages are walked in ascending order. A stage can start only when every
//! earlier stage could start and all of its own blocking lines are covered.
//! The first stage failing that test is the blocked stage; later stages are
//! still reported with their own rates but can never start.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::ledger::{StageCounters, StageLedger};
use crate::line::ShortageRecord;
use crate::stage::Stage;

/// `done / total * 100` rounded to 2 dp; 100 when `total` is 0.
pub fn completion_rate(done: u32, total: u32) -> Decimal {
    if total == 0 {
        return Decimal::ONE_HUNDRED;
    }
    (Decimal::from(done) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(2)
}

/// Gate verdict and rates for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateResult {
    pub stage_code: String,
    pub stage_name: String,
    pub stage_order: i32,
    pub stage_color: String,
    pub total: u32,
    pub fulfilled: u32,
    pub kit_rate: Decimal,
    pub blocking_total: u32,
    pub blocking_fulfilled: u32,
    pub blocking_rate: Decimal,
    pub can_start: bool,
}

/// Whole-pipeline totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    pub total: u32,
    pub fulfilled: u32,
    pub blocking_total: u32,
    pub blocking_fulfilled: u32,
    pub kit_rate: Decimal,
    pub blocking_rate: Decimal,
    /// Number of shortage records across all stages.
    pub shortage_count: usize,
}

impl OverallStats {
    fn from_counters(counters: StageCounters, shortage_count: usize) -> Self {
        Self {
            total: counters.total,
            fulfilled: counters.fulfilled,
            blocking_total: counters.blocking_total,
            blocking_fulfilled: counters.blocking_fulfilled,
            kit_rate: completion_rate(counters.fulfilled, counters.total),
            blocking_rate: completion_rate(counters.blocking_fulfilled, counters.blocking_total),
            shortage_count,
        }
    }

    pub fn counters(&self) -> StageCounters {
        StageCounters {
            total: self.total,
            fulfilled: self.fulfilled,
            blocking_total: self.blocking_total,
            blocking_fulfilled: self.blocking_fulfilled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateOutcome {
    pub stages: Vec<GateResult>,
    /// `true` only when no stage failed its gate.
    pub can_proceed: bool,
    pub first_blocked_stage: Option<String>,
    /// Last stage of the unbroken startable prefix.
    pub current_workable_stage: Option<String>,
    pub overall: OverallStats,
    /// Blocking shortages of the first blocked stage only.
    pub blocking_items: Vec<ShortageRecord>,
}

/// Walk `stages` in order (callers pass them sorted) and derive the gate outcome.
pub fn propagate_gates(
    stages: &[Stage],
    ledger: &StageLedger<'_>,
    shortages: &[ShortageRecord],
) -> GateOutcome {
    let mut can_proceed = true;
    let mut first_blocked_stage = None;
    let mut current_workable_stage = None;
    let mut blocking_items = Vec::new();
    let mut overall = StageCounters::default();
    let mut results = Vec::with_capacity(stages.len());

    for stage in stages {
        let counters = ledger.counters(&stage.code);
        let kit_rate = completion_rate(counters.fulfilled, counters.total);
        let blocking_rate = completion_rate(counters.blocking_fulfilled, counters.blocking_total);
        let stage_can_start = can_proceed && blocking_rate == Decimal::ONE_HUNDRED;

        if stage_can_start {
            current_workable_stage = Some(stage.code.clone());
        } else if can_proceed {
            debug!(stage = %stage.code, %blocking_rate, "first blocked stage");
            first_blocked_stage = Some(stage.code.clone());
            can_proceed = false;
            blocking_items.extend(
                shortages
                    .iter()
                    .filter(|s| s.stage_code == stage.code && s.blocking)
                    .cloned(),
            );
        }

        overall += counters;

        // Prefer the ledger's back-reference for display metadata.
        let meta = ledger.entry(&stage.code).map(|e| e.stage).unwrap_or(stage);
        results.push(GateResult {
            stage_code: meta.code.clone(),
            stage_name: meta.name.clone(),
            stage_order: meta.order,
            stage_color: meta.color.clone(),
            total: counters.total,
            fulfilled: counters.fulfilled,
            kit_rate,
            blocking_total: counters.blocking_total,
            blocking_fulfilled: counters.blocking_fulfilled,
            blocking_rate,
            can_start: stage_can_start,
        });
    }

    GateOutcome {
        stages: results,
        can_proceed,
        first_blocked_stage,
        current_workable_stage,
        overall: OverallStats::from_counters(overall, shortages.len()),
        blocking_items,
    }
}
