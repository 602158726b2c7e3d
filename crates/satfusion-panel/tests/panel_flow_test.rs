//! End-to-end panel flows against a mock analysis service

use satfusion_client::HttpAnalysisClient;
use satfusion_core::models::{AnalysisResult, AnalysisType, RequestStatus, SourceId};
use satfusion_geo::SelectionMode;
use satfusion_panel::{AnalysisOrchestrator, PanelEvent, PanelState};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orchestrator(server: &MockServer) -> AnalysisOrchestrator<HttpAnalysisClient> {
    let client = HttpAnalysisClient::new(server.uri(), Duration::from_secs(10)).unwrap();
    AnalysisOrchestrator::new(client)
}

#[tokio::test]
async fn test_ndvi_point_analysis() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/ndvi"))
        .and(body_json(json!({
            "sources": ["sentinel-2"],
            "geometry": {"type": "Point", "coordinates": [77.2, 28.6]},
            "date_range": {"start": "01-01-2024", "end": "31-01-2024"},
            "cloud_cover_max": 20
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statistics": {"mean": 0.42, "min": -0.1, "max": 0.81},
            "image_count": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    let mut state = PanelState::new();
    state.apply(PanelEvent::MapClicked { lat: 28.6, lng: 77.2 }).unwrap();
    state.apply(PanelEvent::AnalysisTypeChanged(AnalysisType::Ndvi)).unwrap();

    orchestrator.run_analysis(&mut state).await;

    assert_eq!(state.status(), RequestStatus::Success);
    assert!(state.error().is_none());
    match state.result() {
        Some(AnalysisResult::Ndvi(ndvi)) => {
            assert_eq!(ndvi.statistics.mean, 0.42);
            assert_eq!(ndvi.image_count, 5);
        }
        other => panic!("expected NDVI result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bounding_box_fusion_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/landcover"))
        .and(body_json(json!({
            "sources": ["sentinel-2", "landsat-8"],
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[77.1, 28.5], [77.3, 28.5], [77.3, 28.7], [77.1, 28.7], [77.1, 28.5]]]
            },
            "date_range": {"start": "01-01-2024", "end": "31-01-2024"},
            "cloud_cover_max": 35
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "land_cover_distribution": {"urban": 0.7, "vegetation": 0.3},
            "image_count": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    let mut state = PanelState::new().with_cloud_cover_max(35);
    state.apply(PanelEvent::ModeChanged(SelectionMode::Polygon)).unwrap();
    state.apply(PanelEvent::MapClicked { lat: 28.7, lng: 77.3 }).unwrap();
    state.apply(PanelEvent::MapClicked { lat: 28.5, lng: 77.1 }).unwrap();
    state.apply(PanelEvent::SourceToggled(SourceId::Landsat8)).unwrap();
    assert!(state.is_fusion());

    orchestrator.run_analysis(&mut state).await;

    assert_eq!(state.status(), RequestStatus::Success);
    assert_eq!(state.result().unwrap().analysis_type(), AnalysisType::Landcover);
}

#[tokio::test]
async fn test_missing_sources_never_reach_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    let mut state = PanelState::new();
    state.apply(PanelEvent::MapClicked { lat: 28.6, lng: 77.2 }).unwrap();
    state.apply(PanelEvent::SourceToggled(SourceId::Sentinel2)).unwrap();

    orchestrator.run_analysis(&mut state).await;

    assert_eq!(state.status(), RequestStatus::Error);
    assert_eq!(state.error(), Some("Please select at least one satellite source"));
}

#[tokio::test]
async fn test_service_error_then_recovery() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/compare"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Compare needs two sources"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/landcover"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "land_cover_distribution": {"water": 1.0},
            "image_count": 1
        })))
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    let mut state = PanelState::new();
    state.apply(PanelEvent::MapClicked { lat: 0.5, lng: 0.5 }).unwrap();
    state.apply(PanelEvent::AnalysisTypeChanged(AnalysisType::Compare)).unwrap();

    orchestrator.run_analysis(&mut state).await;
    assert_eq!(state.status(), RequestStatus::Error);
    assert_eq!(state.error(), Some("Compare needs two sources"));
    assert!(state.result().is_none());

    state.apply(PanelEvent::AnalysisTypeChanged(AnalysisType::Landcover)).unwrap();
    orchestrator.run_analysis(&mut state).await;
    assert_eq!(state.status(), RequestStatus::Success);
    assert!(state.error().is_none());
}

#[tokio::test]
async fn test_slow_older_response_is_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/landcover"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"land_cover_distribution": {"water": 1.0}, "image_count": 1}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/analysis/ndvi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statistics": {"mean": 0.2, "min": 0.0, "max": 0.5},
            "image_count": 2
        })))
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    let mut state = PanelState::new();
    state.apply(PanelEvent::MapClicked { lat: 10.0, lng: 10.0 }).unwrap();

    let slow = state.begin_analysis().unwrap();
    state.apply(PanelEvent::AnalysisTypeChanged(AnalysisType::Ndvi)).unwrap();
    let fast = state.begin_analysis().unwrap();

    let (slow_outcome, fast_outcome) =
        tokio::join!(orchestrator.execute(&slow), orchestrator.execute(&fast));

    assert!(state.resolve(fast.ticket, fast_outcome));
    assert!(!state.resolve(slow.ticket, slow_outcome));
    assert_eq!(state.result().unwrap().analysis_type(), AnalysisType::Ndvi);
    assert_eq!(state.status(), RequestStatus::Success);
}
