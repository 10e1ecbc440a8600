use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use kitready_core::{BomId, MachineId, ProjectId, TenantId};

#[derive(Parser)]
#[command(
    name = "kitready",
    about = "Staged kit-readiness gating over a BOM and its assembly stages",
    version
)]
pub struct Cli {
    /// Log line format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Json,
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a BOM and print the readiness report as JSON
    Report(ReportArgs),
}

#[derive(Debug, clap::Args)]
pub struct ReportArgs {
    /// Path to the dataset JSON file
    #[arg(long)]
    pub dataset: PathBuf,

    /// Tenant owning the project
    #[arg(long)]
    pub tenant: TenantId,

    #[arg(long)]
    pub project: ProjectId,

    #[arg(long)]
    pub bom: BomId,

    /// Optional machine the BOM is built for
    #[arg(long)]
    pub machine: Option<MachineId>,

    /// Check date (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}
