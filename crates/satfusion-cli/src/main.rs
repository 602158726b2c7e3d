//! SatFusion CLI - Command-line control panel
//!
//! Drives the panel state and analysis orchestrator from the terminal.

mod cli;
mod commands;
mod config_loader;
mod output;
mod output_types;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(commands::execute(cli))
}
