//! Integration tests for HttpAnalysisClient using wiremock

use satfusion_client::HttpAnalysisClient;
use satfusion_core::error::{RemoteError, FALLBACK_REMOTE_MESSAGE};
use satfusion_core::models::{
    AnalysisRequest, AnalysisResult, AnalysisType, DateRange, Geometry, SourceId, SourceSelection,
};
use satfusion_core::ports::AnalysisService;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(mock_server: &MockServer) -> HttpAnalysisClient {
    HttpAnalysisClient::new(mock_server.uri(), Duration::from_secs(10)).unwrap()
}

fn create_test_request() -> AnalysisRequest {
    AnalysisRequest::new(
        SourceSelection::from_ids([SourceId::Sentinel2, SourceId::Landsat8]),
        Geometry::point(28.6, 77.2).unwrap(),
        DateRange::default(),
    )
}

fn expected_body() -> serde_json::Value {
    json!({
        "sources": ["sentinel-2", "landsat-8"],
        "geometry": {"type": "Point", "coordinates": [77.2, 28.6]},
        "date_range": {"start": "01-01-2024", "end": "31-01-2024"},
        "cloud_cover_max": 20
    })
}

#[tokio::test]
async fn test_landcover_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/landcover"))
        .and(body_json(expected_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "land_cover_distribution": {"water": 0.05, "vegetation": 0.35, "urban": 0.6},
            "image_count": 3,
            "metadata": {"total_area_km2": 3.14}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = client.landcover(&create_test_request()).await.unwrap();

    assert_eq!(result.image_count, 3);
    assert_eq!(result.land_cover_distribution["urban"], 0.6);
    assert_eq!(result.metadata.unwrap().total_area_km2, 3.14);
}

#[tokio::test]
async fn test_analyze_routes_to_single_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/compare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comparison": {
                "sentinel-2": {"image_count": 6, "quality_score": 0.92, "mean_ndvi": 0.44},
                "landsat-8": {"image_count": 2, "quality_score": 0.71, "mean_ndvi": null}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    for other in ["/api/analysis/landcover", "/api/analysis/ndvi"] {
        Mock::given(method("POST"))
            .and(path(other))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let client = create_client(&mock_server);
    let result = client.analyze(AnalysisType::Compare, &create_test_request()).await.unwrap();

    match result {
        AnalysisResult::Compare(compare) => {
            assert_eq!(compare.comparison[&SourceId::Sentinel2].image_count, 6);
            assert_eq!(compare.comparison[&SourceId::Landsat8].mean_ndvi, None);
        }
        other => panic!("expected compare result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/ndvi"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "No cloud-free scenes in the selected window"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = client.ndvi(&create_test_request()).await.unwrap_err();

    assert_eq!(
        err,
        RemoteError::Rejected {
            status: 404,
            detail: Some("No cloud-free scenes in the selected window".to_string())
        }
    );
    assert_eq!(err.user_message(), "No cloud-free scenes in the selected window");
}

#[tokio::test]
async fn test_error_without_detail_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/ndvi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = client.ndvi(&create_test_request()).await.unwrap_err();

    assert!(matches!(err, RemoteError::Rejected { status: 500, detail: None }));
    assert_eq!(err.user_message(), FALLBACK_REMOTE_MESSAGE);
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/ndvi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"statistics": "n/a"})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = client.ndvi(&create_test_request()).await.unwrap_err();

    assert!(matches!(err, RemoteError::MalformedResponse { .. }));
    assert_eq!(err.user_message(), FALLBACK_REMOTE_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = HttpAnalysisClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = client.landcover(&create_test_request()).await.unwrap_err();

    assert!(matches!(err, RemoteError::Transport { .. }));
    assert_eq!(err.user_message(), FALLBACK_REMOTE_MESSAGE);
}

#[tokio::test]
async fn test_auxiliary_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/satellite/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sources": ["sentinel-2"]})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/satellite/query"))
        .and(body_json(expected_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scenes": []})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/merge"))
        .and(body_json(expected_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"composite_url": "x.tif"})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let request = create_test_request();

    assert_eq!(client.health().await.unwrap()["status"], "healthy");
    assert_eq!(client.sources().await.unwrap()["sources"][0], "sentinel-2");
    assert!(client.query_scenes(&request).await.unwrap()["scenes"].is_array());
    assert_eq!(client.merge_composite(&request).await.unwrap()["composite_url"], "x.tif");
}
