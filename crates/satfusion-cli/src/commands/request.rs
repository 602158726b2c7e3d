//! Turns request flags into panel events

use crate::cli::RequestArgs;
use anyhow::{bail, Context, Result};
use satfusion_core::models::{AnalysisType, Geometry, SourceSelection};
use satfusion_geo::SelectionMode;
use satfusion_panel::{PanelEvent, PanelState};
use std::path::Path;

/// Build panel state the same way a user would through the UI
pub fn build_panel(
    args: RequestArgs,
    analysis_type: AnalysisType,
    cloud_cover_max: u8,
) -> Result<PanelState> {
    let mut state = PanelState::new().with_cloud_cover_max(cloud_cover_max);

    if let Some((lat, lng)) = args.point {
        state.apply(PanelEvent::MapClicked { lat, lng })?;
    }

    match args.corner.as_slice() {
        [] => {}
        [(lat1, lng1), (lat2, lng2)] => {
            state.apply(PanelEvent::ModeChanged(SelectionMode::Polygon))?;
            state.apply(PanelEvent::MapClicked { lat: *lat1, lng: *lng1 })?;
            state.apply(PanelEvent::MapClicked { lat: *lat2, lng: *lng2 })?;
        }
        other => bail!("A bounding box needs exactly two --corner values, got {}", other.len()),
    }

    if let Some(input) = &args.geometry {
        state.apply(PanelEvent::GeometryEntered(load_geometry(input)?))?;
    }

    if !args.sources.is_empty() {
        state.apply(PanelEvent::SourcesChanged(SourceSelection::from_ids(args.sources)))?;
    }
    if let Some(start) = args.start {
        state.apply(PanelEvent::StartDateChanged(start))?;
    }
    if let Some(end) = args.end {
        state.apply(PanelEvent::EndDateChanged(end))?;
    }
    state.apply(PanelEvent::AnalysisTypeChanged(analysis_type))?;

    Ok(state)
}

/// Parse a GeoJSON geometry given inline or as a file path
fn load_geometry(input: &str) -> Result<Geometry> {
    let path = Path::new(input);
    let content = if path.is_file() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read geometry file {}", path.display()))?
    } else {
        input.to_string()
    };

    Geometry::from_geojson_str(&content).context("Invalid --geometry")
}
