//! Health command implementation

use crate::output::OutputWriter;
use anyhow::{Context, Result};
use satfusion_client::HttpAnalysisClient;
use satfusion_core::config::LayeredConfig;

pub async fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let client = HttpAnalysisClient::from_config(config)?;
    tracing::info!(base_url = %client.base_url(), "Checking analysis service health");

    let health = client
        .health()
        .await
        .with_context(|| format!("Analysis service at {} is not healthy", client.base_url()))?;

    if output.is_json() {
        output.result(health)?;
    } else {
        output.success(format!("Analysis service at {} is reachable", client.base_url()));
        if let Some(fields) = health.as_object() {
            for (key, value) in fields {
                match value.as_str() {
                    Some(text) => output.kv(key, text),
                    None => output.kv(key, value),
                }
            }
        }
    }

    Ok(())
}
