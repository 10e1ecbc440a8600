//! `kitready`: staged kit-readiness reports from a dataset file.

mod cli;
mod report;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands, LogFormatArg};
use kitready_observability::{LogFormat, ObservabilityConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    kitready_observability::init_with(&ObservabilityConfig {
        format: match cli.log_format {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Text => LogFormat::Text,
        },
        stderr: true,
        ..ObservabilityConfig::default()
    });

    let result = match &cli.command {
        Commands::Report(args) => report::run(args),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "report failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
