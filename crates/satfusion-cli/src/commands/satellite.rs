//! Scene query and composite passthroughs

use crate::cli::RequestArgs;
use crate::commands::request::build_panel;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use satfusion_client::HttpAnalysisClient;
use satfusion_core::config::LayeredConfig;
use satfusion_core::models::{AnalysisRequest, AnalysisType};

pub async fn scenes(args: RequestArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (client, request) = prepare(args, config)?;
    let scenes = client
        .query_scenes(&request)
        .await
        .with_context(|| format!("Scene query against {} failed", client.base_url()))?;

    if !output.is_json() {
        output.section("Matching Scenes");
    }
    output.result(scenes)
}

pub async fn merge(args: RequestArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let (client, request) = prepare(args, config)?;
    if request.sources.len() < 2 {
        output.warning("A composite from a single source is just that source");
    }

    let composite = client
        .merge_composite(&request)
        .await
        .with_context(|| format!("Composite request against {} failed", client.base_url()))?;

    if !output.is_json() {
        output.section("Composite");
    }
    output.result(composite)
}

fn prepare(args: RequestArgs, config: &LayeredConfig) -> Result<(HttpAnalysisClient, AnalysisRequest)> {
    let state = build_panel(args, AnalysisType::default(), config.cloud_cover_max.value)?;
    let request = state.request()?;
    let client = HttpAnalysisClient::from_config(config)?;
    tracing::info!(
        base_url = %client.base_url(),
        sources = request.sources.len(),
        geometry = request.geometry.type_name(),
        "Prepared satellite request"
    );
    Ok((client, request))
}
