use crate::error::RemoteError;
use crate::models::{
    AnalysisRequest, AnalysisResult, AnalysisType, CompareResult, LandCoverResult, NdviResult,
};
use async_trait::async_trait;

/// Port for the remote analysis service
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Land-cover classification over the request geometry
    async fn landcover(&self, request: &AnalysisRequest) -> Result<LandCoverResult, RemoteError>;

    /// NDVI statistics over the request geometry
    async fn ndvi(&self, request: &AnalysisRequest) -> Result<NdviResult, RemoteError>;

    /// Per-source comparison
    async fn compare(&self, request: &AnalysisRequest) -> Result<CompareResult, RemoteError>;

    /// Route to exactly one operation and tag the payload with its type
    async fn analyze(
        &self,
        analysis_type: AnalysisType,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, RemoteError> {
        match analysis_type {
            AnalysisType::Landcover => self.landcover(request).await.map(AnalysisResult::Landcover),
            AnalysisType::Ndvi => self.ndvi(request).await.map(AnalysisResult::Ndvi),
            AnalysisType::Compare => self.compare(request).await.map(AnalysisResult::Compare),
        }
    }
}
