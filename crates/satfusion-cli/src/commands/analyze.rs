//! Analyze command implementation

use crate::cli::AnalyzeArgs;
use crate::commands::request::build_panel;
use crate::output::OutputWriter;
use crate::output_types::{ComparisonRow, LandCoverRow};
use anyhow::Result;
use satfusion_client::HttpAnalysisClient;
use satfusion_core::config::LayeredConfig;
use satfusion_core::models::{AnalysisResult, AnalysisType, RequestStatus};
use satfusion_panel::{AnalysisOrchestrator, PanelState};
use std::process::ExitCode;

pub async fn execute(
    args: AnalyzeArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<ExitCode> {
    let client = HttpAnalysisClient::from_config(config)?;
    let orchestrator = AnalysisOrchestrator::new(client);
    let mut state = build_panel(args.request, args.analysis_type, config.cloud_cover_max.value)?;

    print_hints(&state, output);
    if state.can_trigger() {
        output.info(format!(
            "Running {} against {}",
            state.analysis_type().label(),
            orchestrator.service().base_url()
        ));
    }

    orchestrator.run_analysis(&mut state).await;
    tracing::debug!(status = ?state.status(), "Analysis run finished");

    if output.is_json() {
        let status = if state.status() == RequestStatus::Success { "success" } else { "error" };
        output.result_with_status(status, state.view())?;
    } else {
        render_human(&state, output);
    }

    Ok(match state.status() {
        RequestStatus::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn print_hints(state: &PanelState, output: &OutputWriter) {
    if !state.date_range().is_chronological() {
        output.warning(format!(
            "Start date {} is after end date {}; sending as entered",
            state.date_range().start,
            state.date_range().end
        ));
    }
    if state.point_buffer_notice() {
        output.info("A 1 km buffer is applied around the point for land cover analysis");
    }
    if state.is_fusion() {
        let detail = if state.analysis_type() == AnalysisType::Compare {
            "sources are aligned spatially and temporally for side-by-side comparison"
        } else {
            "sources are aligned spatially and temporally and fused into one analysis"
        };
        output.info(format!("Fusion active ({} sources): {}", state.sources().len(), detail));
    }
}

fn render_human(state: &PanelState, output: &OutputWriter) {
    if let Some(message) = state.error() {
        output.error(message);
        return;
    }
    let Some(result) = state.result() else {
        return;
    };

    render_selection(state, output);

    output.section(state.analysis_type().label());
    match result {
        AnalysisResult::Landcover(landcover) => {
            let rows: Vec<LandCoverRow> = landcover
                .land_cover_distribution
                .iter()
                .map(|(class, share)| LandCoverRow {
                    class: class.clone(),
                    share: format!("{:.1}%", share * 100.0),
                })
                .collect();
            output.table(rows);
            output.kv("Images analyzed", landcover.image_count);
            if let Some(metadata) = &landcover.metadata {
                output.kv("Total area", format!("{} km²", metadata.total_area_km2));
            }
        }
        AnalysisResult::Ndvi(ndvi) => {
            output.kv("Mean NDVI", format!("{:.3}", ndvi.statistics.mean));
            output.kv("Min NDVI", format!("{:.3}", ndvi.statistics.min));
            output.kv("Max NDVI", format!("{:.3}", ndvi.statistics.max));
            output.kv("Images analyzed", ndvi.image_count);
        }
        AnalysisResult::Compare(compare) => {
            let rows: Vec<ComparisonRow> = compare
                .comparison
                .iter()
                .map(|(source, data)| ComparisonRow {
                    source: *source,
                    image_count: data.image_count,
                    quality: format!("{:.0}%", data.quality_score * 100.0),
                    mean_ndvi: data
                        .mean_ndvi
                        .map(|v| format!("{:.3}", v))
                        .unwrap_or_else(|| "-".to_string()),
                })
                .collect();
            output.table(rows);
        }
    }
    output.success("Analysis complete");
}

fn render_selection(state: &PanelState, output: &OutputWriter) {
    let view = state.view();
    let Some(geometry) = view.geometry else {
        return;
    };

    output.section("Selection");
    output.kv("Type", geometry.type_name());
    if let Some(centre) = view.selection_centroid {
        output.kv("Centre", centre);
    }
    if !geometry.is_point() {
        output.kv("Area", format!("{:.1} km²", view.selection_area_km2.unwrap_or_default()));
        output.kv("Diagonal", format!("{:.1} km", view.selection_extent_km.unwrap_or_default()));
    }
}
