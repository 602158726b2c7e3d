use satfusion_core::models::{SourceId, SourceInfo};
use serde::Serialize;
use tabled::Tabled;

/// One catalog entry for the sources command
#[derive(Debug, Serialize, Tabled)]
pub struct SourceRow {
    #[tabled(rename = "ID")]
    pub id: SourceId,
    #[tabled(rename = "Name")]
    pub name: &'static str,
    #[tabled(rename = "Provider")]
    pub provider: &'static str,
    #[tabled(rename = "Resolution (m)")]
    pub resolution_m: f64,
}

impl From<SourceInfo> for SourceRow {
    fn from(info: SourceInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            provider: info.provider,
            resolution_m: info.resolution_m,
        }
    }
}

/// One resolved configuration value for the config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// Land cover class share, as a table row
#[derive(Debug, Tabled)]
pub struct LandCoverRow {
    #[tabled(rename = "Class")]
    pub class: String,
    #[tabled(rename = "Share")]
    pub share: String,
}

/// Per-source comparison, as a table row
#[derive(Debug, Tabled)]
pub struct ComparisonRow {
    #[tabled(rename = "Source")]
    pub source: SourceId,
    #[tabled(rename = "Images")]
    pub image_count: u32,
    #[tabled(rename = "Quality")]
    pub quality: String,
    #[tabled(rename = "Mean NDVI")]
    pub mean_ndvi: String,
}
