//! Command implementations

mod analyze;
mod config;
mod health;
mod request;
mod satellite;
mod sources;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;
use std::process::ExitCode;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<ExitCode> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, &config, &output).await,
        Commands::Health => health::execute(&config, &output).await.map(|()| ExitCode::SUCCESS),
        Commands::Sources(args) => {
            sources::execute(args, &config, &output).await.map(|()| ExitCode::SUCCESS)
        }
        Commands::Scenes(args) => {
            satellite::scenes(args, &config, &output).await.map(|()| ExitCode::SUCCESS)
        }
        Commands::Merge(args) => {
            satellite::merge(args, &config, &output).await.map(|()| ExitCode::SUCCESS)
        }
        Commands::Config => config::execute(&config, &output).map(|()| ExitCode::SUCCESS),
    }
}
