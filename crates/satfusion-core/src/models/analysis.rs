//! Analysis requests and the result shapes returned by the service.

use crate::error::{FusionError, Result};
use crate::models::date::DateRange;
use crate::models::geometry::Geometry;
use crate::models::source::{SourceId, SourceSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default maximum cloud cover percentage sent with every request
pub const DEFAULT_CLOUD_COVER_MAX: u8 = 20;

/// Which remote analysis to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    Landcover,
    Ndvi,
    Compare,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Landcover => "landcover",
            AnalysisType::Ndvi => "ndvi",
            AnalysisType::Compare => "compare",
        }
    }

    /// Service path for this analysis
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisType::Landcover => "/api/analysis/landcover",
            AnalysisType::Ndvi => "/api/analysis/ndvi",
            AnalysisType::Compare => "/api/analysis/compare",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::Landcover => "Land Cover Classification",
            AnalysisType::Ndvi => "NDVI Analysis",
            AnalysisType::Compare => "Compare Sources",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "landcover" | "land-cover" => Ok(AnalysisType::Landcover),
            "ndvi" => Ok(AnalysisType::Ndvi),
            "compare" => Ok(AnalysisType::Compare),
            _ => Err(FusionError::UnknownAnalysisType { name: s.to_string() }),
        }
    }
}

/// Request body shared by all analysis endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub sources: SourceSelection,
    pub geometry: Geometry,
    pub date_range: DateRange,
    pub cloud_cover_max: u8,
}

impl AnalysisRequest {
    pub fn new(sources: SourceSelection, geometry: Geometry, date_range: DateRange) -> Self {
        Self {
            sources,
            geometry,
            date_range,
            cloud_cover_max: DEFAULT_CLOUD_COVER_MAX,
        }
    }

    pub fn with_cloud_cover_max(mut self, cloud_cover_max: u8) -> Self {
        self.cloud_cover_max = cloud_cover_max;
        self
    }
}

/// `POST /api/analysis/landcover` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandCoverResult {
    /// Class name to fraction of the area in `0..=1`
    pub land_cover_distribution: BTreeMap<String, f64>,
    pub image_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LandCoverMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandCoverMetadata {
    pub total_area_km2: f64,
}

/// `POST /api/analysis/ndvi` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviResult {
    pub statistics: NdviStatistics,
    pub image_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviStatistics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// `POST /api/analysis/compare` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResult {
    pub comparison: BTreeMap<SourceId, SourceComparison>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceComparison {
    pub image_count: u32,
    /// Quality score in `0..=1`
    pub quality_score: f64,
    pub mean_ndvi: Option<f64>,
}

/// A resolved analysis, tagged with the analysis type that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analysis", content = "result", rename_all = "lowercase")]
pub enum AnalysisResult {
    Landcover(LandCoverResult),
    Ndvi(NdviResult),
    Compare(CompareResult),
}

impl AnalysisResult {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            AnalysisResult::Landcover(_) => AnalysisType::Landcover,
            AnalysisResult::Ndvi(_) => AnalysisType::Ndvi,
            AnalysisResult::Compare(_) => AnalysisType::Compare,
        }
    }
}

/// Lifecycle of the current analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}
