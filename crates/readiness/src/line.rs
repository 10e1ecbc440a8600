//! Analysis of a single BOM line: stage assignment, shortage arithmetic and
//! the shortage record handed to reporting.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use kitready_core::{BomLineId, MaterialId};
use kitready_inventory::{AvailabilityResolver, MaterialCatalog};
use kitready_purchasing::ArrivalLookup;

use crate::alert::{AlertClassifier, AlertLevel};
use crate::bom::BomLineItem;
use crate::config::ReadinessConfig;
use crate::ledger::StageLedger;

/// Report row for one under-covered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortageRecord {
    pub line_id: BomLineId,
    pub material_id: MaterialId,
    pub material_code: String,
    pub material_name: String,
    pub stage_code: String,
    pub blocking: bool,
    pub required_quantity: Decimal,
    pub available_quantity: Decimal,
    pub shortage_quantity: Decimal,
    /// Percentage of the requirement that is missing, 2 dp.
    pub shortage_rate: Decimal,
    pub days_to_required: i64,
    pub alert_level: AlertLevel,
    pub expected_arrival: Option<NaiveDate>,
    pub required_date: Option<NaiveDate>,
}

/// Everything a line needs besides the line itself and the ledger.
#[derive(Clone, Copy)]
pub struct LineContext<'a> {
    pub check_date: NaiveDate,
    pub config: &'a ReadinessConfig,
    pub materials: &'a dyn MaterialCatalog,
    pub availability: &'a dyn AvailabilityResolver,
    pub alerts: &'a dyn AlertClassifier,
    pub arrivals: &'a dyn ArrivalLookup,
}

/// `max(0, required - available)`, saturating at `Decimal::MAX`.
pub fn shortage_of(required: Decimal, available: Decimal) -> Decimal {
    match required.checked_sub(available) {
        Some(diff) => diff.max(Decimal::ZERO),
        // Only a hugely negative `available` can push the difference past MAX.
        None if available.is_sign_negative() => Decimal::MAX,
        None => Decimal::ZERO,
    }
}

/// `shortage / required * 100` rounded to 2 dp; 0 when nothing is required.
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn shortage_rate(shortage: Decimal, required: Decimal) -> Decimal {
    if required.is_zero() {
        return Decimal::ZERO;
    }
    shortage
        .checked_div(required)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|rate| rate.round_dp(2))
        .unwrap_or(Decimal::MAX)
}

/// Stage code and blocking flag for a line, before the known-stage check.
fn assignment<'l>(line: &'l BomLineItem, fallback: &'l str) -> (&'l str, bool) {
    match &line.assembly {
        Some(attrs) => (attrs.stage_code.as_deref().unwrap_or(fallback), attrs.blocking),
        None => (fallback, true),
    }
}

/// Analyze one line, updating its stage's counters in `ledger`.
///
/// Returns a shortage record when the line is not fully covered. Lines whose
/// material no longer exists are skipped entirely: no counters, no record.
/// Call exactly once per line per analysis.
pub fn analyze_line(
    line: &BomLineItem,
    ctx: &LineContext<'_>,
    ledger: &mut StageLedger<'_>,
) -> Option<ShortageRecord> {
    let Some(material) = ctx.materials.material(line.material_id) else {
        debug!(
            line_id = %line.id,
            material_id = %line.material_id,
            "material not found; line skipped"
        );
        return None;
    };

    let fallback = ctx.config.fallback_stage.as_str();
    let (assigned, blocking) = assignment(line, fallback);
    let stage_code = if ledger.contains(assigned) {
        assigned
    } else {
        if assigned != fallback {
            debug!(
                line_id = %line.id,
                stage = assigned,
                fallback,
                "unknown stage code; using fallback"
            );
        }
        fallback
    };

    let required = line.required_or_default();
    let snapshot = ctx.availability.resolve(material.id, ctx.check_date);
    let shortage = shortage_of(required, snapshot.available);
    let fulfilled = shortage.is_zero();

    if !ledger.record(stage_code, blocking, fulfilled) {
        warn!(
            line_id = %line.id,
            stage = stage_code,
            "fallback stage missing from ledger; line skipped"
        );
        return None;
    }

    if fulfilled {
        return None;
    }

    let rate = shortage_rate(shortage, required);
    let days_to_required = line
        .required_date
        .map(|d| (d - ctx.check_date).num_days())
        .unwrap_or(ctx.config.default_days_to_required);
    let alert_level = ctx.alerts.classify(blocking, rate, days_to_required);
    let expected_arrival = ctx.arrivals.expected_arrival(material.id);

    Some(ShortageRecord {
        line_id: line.id,
        material_id: material.id,
        material_code: material.code,
        material_name: material.name,
        stage_code: stage_code.to_string(),
        blocking,
        required_quantity: required,
        available_quantity: snapshot.available,
        shortage_quantity: shortage,
        shortage_rate: rate,
        days_to_required,
        alert_level,
        expected_arrival,
        required_date: line.required_date,
    })
}
