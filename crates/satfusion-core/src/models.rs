pub mod analysis;
pub mod date;
pub mod geometry;
pub mod source;

pub use analysis::{
    AnalysisRequest, AnalysisResult, AnalysisType, CompareResult, LandCoverMetadata,
    LandCoverResult, NdviResult, NdviStatistics, RequestStatus, SourceComparison,
    DEFAULT_CLOUD_COVER_MAX,
};
pub use date::{DateRange, WireDate};
pub use geometry::{BoundingBox, Coordinate, Geometry};
pub use source::{SourceId, SourceInfo, SourceSelection};
