//! Sources command implementation

use crate::cli::SourcesArgs;
use crate::output::OutputWriter;
use crate::output_types::SourceRow;
use anyhow::{Context, Result};
use satfusion_client::HttpAnalysisClient;
use satfusion_core::config::LayeredConfig;
use satfusion_core::models::SourceId;

pub async fn execute(
    args: SourcesArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    if args.remote {
        let client = HttpAnalysisClient::from_config(config)?;
        tracing::info!(base_url = %client.base_url(), "Fetching source catalog");
        let catalog = client
            .sources()
            .await
            .with_context(|| format!("Failed to fetch sources from {}", client.base_url()))?;
        return output.result(catalog);
    }

    let rows: Vec<SourceRow> = SourceId::ALL.iter().map(|id| id.info().into()).collect();

    if output.is_json() {
        output.result(rows)?;
    } else {
        output.section("Satellite Sources");
        output.table(rows);
    }

    Ok(())
}
