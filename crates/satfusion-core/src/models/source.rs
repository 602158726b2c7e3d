//! Satellite data sources and the user's source selection.

use crate::error::{FusionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Satellite data source identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceId {
    #[serde(rename = "sentinel-2")]
    Sentinel2,
    #[serde(rename = "landsat-8")]
    Landsat8,
    #[serde(rename = "isro-resourcesat")]
    IsroResourcesat,
}

impl SourceId {
    /// All sources, in catalog order
    pub const ALL: [SourceId; 3] = [SourceId::Sentinel2, SourceId::Landsat8, SourceId::IsroResourcesat];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Sentinel2 => "sentinel-2",
            SourceId::Landsat8 => "landsat-8",
            SourceId::IsroResourcesat => "isro-resourcesat",
        }
    }

    /// Catalog metadata for this source
    pub fn info(&self) -> SourceInfo {
        match self {
            SourceId::Sentinel2 => SourceInfo {
                id: *self,
                name: "Sentinel-2",
                provider: "ESA/Copernicus",
                resolution_m: 10.0,
            },
            SourceId::Landsat8 => SourceInfo {
                id: *self,
                name: "Landsat 8",
                provider: "USGS",
                resolution_m: 30.0,
            },
            SourceId::IsroResourcesat => SourceInfo {
                id: *self,
                name: "ISRO ResourceSat",
                provider: "ISRO",
                resolution_m: 23.5,
            },
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        SourceId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| FusionError::UnknownSource { id: s.to_string() })
    }
}

/// Static catalog entry describing a source
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceInfo {
    pub id: SourceId,
    pub name: &'static str,
    pub provider: &'static str,
    pub resolution_m: f64,
}

/// Ordered set of chosen sources.
///
/// Order has no meaning for the analysis but is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSelection(Vec<SourceId>);

impl SourceSelection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from an iterator, dropping duplicates but keeping first-seen order
    pub fn from_ids(ids: impl IntoIterator<Item = SourceId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            selection.insert(id);
        }
        selection
    }

    /// Add a source if it is not already selected
    pub fn insert(&mut self, id: SourceId) {
        if !self.0.contains(&id) {
            self.0.push(id);
        }
    }

    pub fn remove(&mut self, id: SourceId) {
        self.0.retain(|s| *s != id);
    }

    /// Add the source when absent, remove it when present
    pub fn toggle(&mut self, id: SourceId) {
        if self.contains(id) {
            self.remove(id);
        } else {
            self.0.push(id);
        }
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[SourceId] {
        &self.0
    }
}

impl FromIterator<SourceId> for SourceSelection {
    fn from_iter<I: IntoIterator<Item = SourceId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
