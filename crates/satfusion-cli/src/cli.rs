use clap::{Args, Parser, Subcommand};
use satfusion_core::config::{parse_api_url, parse_cloud_cover, parse_timeout};
use satfusion_core::models::{AnalysisType, SourceId, WireDate};
use std::path::PathBuf;

/// SatFusion - Multi-source satellite analysis control panel
#[derive(Parser, Debug)]
#[command(name = "satfusion")]
#[command(about = "Multi-source satellite analysis control panel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Analysis service base URL (overrides config and SATFUSION_API_URL)
    #[arg(long, global = true, value_name = "URL", value_parser = parse_api_url)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Configuration file (defaults to ./satfusion.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an analysis over a point or bounding box
    Analyze(AnalyzeArgs),

    /// Check that the analysis service is reachable
    Health,

    /// List satellite sources
    Sources(SourcesArgs),

    /// List scenes matching a selection
    Scenes(RequestArgs),

    /// Request a multi-source composite for a selection
    Merge(RequestArgs),

    /// Show effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Analysis to run (landcover, ndvi, compare)
    #[arg(long = "type", short = 't', default_value = "landcover", value_name = "TYPE")]
    pub analysis_type: AnalysisType,
}

/// Inputs shared by every command that builds an analysis request
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Point selection as LAT,LNG
    #[arg(
        long,
        value_name = "LAT,LNG",
        value_parser = parse_lat_lng,
        allow_hyphen_values = true,
        conflicts_with_all = ["corner", "geometry"]
    )]
    pub point: Option<(f64, f64)>,

    /// Bounding box corner as LAT,LNG (give exactly two)
    #[arg(
        long,
        value_name = "LAT,LNG",
        value_parser = parse_lat_lng,
        allow_hyphen_values = true,
        num_args = 1,
        conflicts_with = "geometry"
    )]
    pub corner: Vec<(f64, f64)>,

    /// GeoJSON Point or axis-aligned box Polygon, any winding (inline or file path)
    #[arg(long, value_name = "GEOJSON")]
    pub geometry: Option<String>,

    /// Satellite source (repeatable; defaults to sentinel-2)
    #[arg(long = "source", short = 's', value_name = "ID")]
    pub sources: Vec<SourceId>,

    /// Start date (DD-MM-YYYY or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<WireDate>,

    /// End date (DD-MM-YYYY or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<WireDate>,

    /// Maximum cloud cover percentage (0-100)
    #[arg(long, value_name = "PERCENT", value_parser = parse_cloud_cover)]
    pub cloud_cover_max: Option<u8>,
}

#[derive(Parser, Debug)]
pub struct SourcesArgs {
    /// Fetch the catalog from the service instead of the built-in list
    #[arg(long)]
    pub remote: bool,
}

/// Parse "LAT,LNG" into a pair
pub fn parse_lat_lng(s: &str) -> Result<(f64, f64), String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("Invalid coordinate '{}': expected LAT,LNG", s))?;

    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid latitude '{}'", lat.trim()))?;
    let lng = lng
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid longitude '{}'", lng.trim()))?;

    Ok((lat, lng))
}
