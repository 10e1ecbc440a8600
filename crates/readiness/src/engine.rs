//! End-to-end readiness analysis for one BOM as of one check date.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument};

use kitready_core::{BomId, DomainResult, MachineId, ProjectId};
use kitready_inventory::{AvailabilityResolver, MaterialCatalog};
use kitready_purchasing::ArrivalLookup;

use crate::alert::AlertClassifier;
use crate::config::ReadinessConfig;
use crate::gate::{GateResult, OverallStats, propagate_gates};
use crate::ledger::StageLedger;
use crate::line::{LineContext, ShortageRecord, analyze_line};
use crate::stage::StageCatalog;
use crate::validate::{ProjectDirectory, validate_input};

/// What to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessRequest {
    pub project_id: ProjectId,
    pub bom_id: BomId,
    pub machine_id: Option<MachineId>,
    pub check_date: NaiveDate,
}

/// Collaborators consulted during an analysis. All lookups are read-only.
#[derive(Clone, Copy)]
pub struct ReadinessSources<'a> {
    pub directory: &'a dyn ProjectDirectory,
    pub materials: &'a dyn MaterialCatalog,
    pub availability: &'a dyn AvailabilityResolver,
    pub alerts: &'a dyn AlertClassifier,
    pub arrivals: &'a dyn ArrivalLookup,
}

/// Full analysis result, as rendered by reporting/UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    pub project_id: ProjectId,
    pub project_code: String,
    pub bom_id: BomId,
    pub bom_name: String,
    pub machine_id: Option<MachineId>,
    pub check_date: NaiveDate,
    pub stages: Vec<GateResult>,
    pub can_proceed: bool,
    pub first_blocked_stage: Option<String>,
    pub current_workable_stage: Option<String>,
    pub overall: OverallStats,
    pub blocking_items: Vec<ShortageRecord>,
    /// Every shortage, independent of gating.
    pub shortage_details: Vec<ShortageRecord>,
}

impl ReadinessReport {
    pub fn gate(&self, stage_code: &str) -> Option<&GateResult> {
        self.stages.iter().find(|g| g.stage_code == stage_code)
    }
}

/// Stage-gated kit readiness analysis.
///
/// The configuration is checked against the stage catalog once, at
/// construction; `analyze` itself only fails on missing project/BOM/machine.
#[derive(Debug, Clone)]
pub struct ReadinessEngine {
    config: ReadinessConfig,
    catalog: StageCatalog,
}

impl ReadinessEngine {
    pub fn new(config: ReadinessConfig, catalog: StageCatalog) -> DomainResult<Self> {
        config.validate_against(&catalog)?;
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &ReadinessConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    #[instrument(
        skip(self, sources),
        fields(
            project_id = %request.project_id,
            bom_id = %request.bom_id,
            check_date = %request.check_date
        )
    )]
    pub fn analyze(
        &self,
        request: &ReadinessRequest,
        sources: &ReadinessSources<'_>,
    ) -> DomainResult<ReadinessReport> {
        let input = validate_input(
            sources.directory,
            request.project_id,
            request.bom_id,
            request.machine_id,
        )?;

        let stages = self.catalog.stages();
        let mut ledger = StageLedger::init(stages);
        let ctx = LineContext {
            check_date: request.check_date,
            config: &self.config,
            materials: sources.materials,
            availability: sources.availability,
            alerts: sources.alerts,
            arrivals: sources.arrivals,
        };

        let shortage_details: Vec<ShortageRecord> = input
            .bom
            .lines
            .iter()
            .filter_map(|line| analyze_line(line, &ctx, &mut ledger))
            .collect();

        let outcome = propagate_gates(stages, &ledger, &shortage_details);

        info!(
            lines = input.bom.lines.len(),
            shortages = shortage_details.len(),
            can_proceed = outcome.can_proceed,
            first_blocked_stage = outcome.first_blocked_stage.as_deref().unwrap_or("-"),
            "readiness analysis complete"
        );

        Ok(ReadinessReport {
            project_id: input.project.id,
            project_code: input.project.code,
            bom_id: input.bom.id,
            bom_name: input.bom.name,
            machine_id: input.machine.map(|m| m.id),
            check_date: request.check_date,
            stages: outcome.stages,
            can_proceed: outcome.can_proceed,
            first_blocked_stage: outcome.first_blocked_stage,
            current_workable_stage: outcome.current_workable_stage,
            overall: outcome.overall,
            blocking_items: outcome.blocking_items,
            shortage_details,
        })
    }
}
