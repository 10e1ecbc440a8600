use anyhow::Context;
use chrono::Utc;
use tracing::info;

use kitready_infra::{Dataset, config};
use kitready_readiness::{ReadinessRequest, ThresholdAlertClassifier};

use crate::cli::ReportArgs;

/// Load the dataset, analyze the requested BOM and render the report as JSON.
pub fn run(args: &ReportArgs) -> anyhow::Result<String> {
    let dataset = Dataset::load(&args.dataset)?;

    // Environment wins over the dataset's embedded config.
    let config = match dataset.config {
        Some(_) => config::overlay(dataset.readiness_config(), |key| std::env::var(key).ok()),
        None => config::readiness_config_from_env(),
    }
    .context("invalid KITREADY_* environment")?;
    let engine = dataset
        .engine(config)
        .context("dataset stages do not fit the readiness config")?;

    let view = dataset
        .into_workspace()
        .scoped(args.tenant)
        .with_context(|| format!("tenant {} has invalid stock data", args.tenant))?;

    let request = ReadinessRequest {
        project_id: args.project,
        bom_id: args.bom,
        machine_id: args.machine,
        check_date: args.date.unwrap_or_else(|| Utc::now().date_naive()),
    };
    info!(
        tenant_id = %view.tenant_id(),
        check_date = %request.check_date,
        stages = engine.catalog().len(),
        fallback_stage = %engine.config().fallback_stage,
        "running readiness report"
    );

    let report = view.analyze(&engine, &request, &ThresholdAlertClassifier::default())?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(rendered)
}
