//! Owned state container for the control panel.
//!
//! All UI input arrives as [`PanelEvent`]s applied through
//! [`PanelState::apply`]. Analysis requests go through a two-step lifecycle:
//! [`PanelState::begin_analysis`] validates and builds the request, and
//! [`PanelState::resolve`] reconciles the outcome. Each dispatch carries a
//! sequence number; only the latest dispatch may write the result.

use satfusion_core::error::{RemoteError, Result, ValidationError, FALLBACK_REMOTE_MESSAGE};
use satfusion_core::models::{
    AnalysisRequest, AnalysisResult, AnalysisType, Coordinate, DateRange, Geometry, RequestStatus,
    SourceId, SourceSelection, WireDate, DEFAULT_CLOUD_COVER_MAX,
};
use satfusion_geo::{spatial, GeometrySelector, SelectionMode, SelectorState};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Input events from the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    MapClicked { lat: f64, lng: f64 },
    ModeChanged(SelectionMode),
    /// Commit a geometry directly, bypassing the click state machine
    GeometryEntered(Geometry),
    SelectionCleared,
    SourceToggled(SourceId),
    SourcesChanged(SourceSelection),
    StartDateChanged(WireDate),
    EndDateChanged(WireDate),
    AnalysisTypeChanged(AnalysisType),
}

/// Identifies one dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    analysis_type: AnalysisType,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Analysis type in effect when the request was dispatched
    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }
}

/// A validated request ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub ticket: RequestTicket,
    pub request: AnalysisRequest,
}

/// The panel's complete in-memory state
#[derive(Debug, Clone)]
pub struct PanelState {
    selector: GeometrySelector,
    geometry: Option<Geometry>,
    sources: SourceSelection,
    date_range: DateRange,
    analysis_type: AnalysisType,
    cloud_cover_max: u8,
    status: RequestStatus,
    error: Option<String>,
    result: Option<AnalysisResult>,
    last_dispatched: u64,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelState {
    /// Point mode, Sentinel-2, January 2024, land cover
    pub fn new() -> Self {
        Self {
            selector: GeometrySelector::new(SelectionMode::Point),
            geometry: None,
            sources: SourceSelection::from_ids([SourceId::Sentinel2]),
            date_range: DateRange::default(),
            analysis_type: AnalysisType::default(),
            cloud_cover_max: DEFAULT_CLOUD_COVER_MAX,
            status: RequestStatus::Idle,
            error: None,
            result: None,
            last_dispatched: 0,
        }
    }

    /// Set the cloud cover ceiling sent with each request
    pub fn with_cloud_cover_max(mut self, cloud_cover_max: u8) -> Self {
        self.cloud_cover_max = cloud_cover_max;
        self
    }

    /// Apply a UI event.
    ///
    /// Only map clicks can fail (out-of-range coordinates); a failed click
    /// leaves the state unchanged.
    pub fn apply(&mut self, event: PanelEvent) -> Result<()> {
        match event {
            PanelEvent::MapClicked { lat, lng } => {
                if let Some(geometry) = self.selector.click(lat, lng)? {
                    debug!(geometry = %geometry, "Selection committed");
                    self.geometry = Some(geometry);
                }
            }
            PanelEvent::ModeChanged(mode) => self.selector.set_mode(mode),
            PanelEvent::GeometryEntered(geometry) => self.geometry = Some(geometry),
            PanelEvent::SelectionCleared => {
                self.geometry = None;
                self.selector.set_mode(self.selector.mode());
            }
            PanelEvent::SourceToggled(id) => self.sources.toggle(id),
            PanelEvent::SourcesChanged(sources) => self.sources = sources,
            PanelEvent::StartDateChanged(date) => self.date_range.start = date,
            PanelEvent::EndDateChanged(date) => self.date_range.end = date,
            PanelEvent::AnalysisTypeChanged(analysis_type) => self.analysis_type = analysis_type,
        }
        Ok(())
    }

    /// Check preconditions and, if they hold, enter `loading`.
    ///
    /// On validation failure the status becomes `error`, the message is
    /// stored, and the previous result is kept.
    pub fn begin_analysis(&mut self) -> std::result::Result<Dispatch, ValidationError> {
        let request = match self.request() {
            Ok(request) => request,
            Err(err) => {
                warn!(reason = %err, "Analysis not started");
                self.status = RequestStatus::Error;
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        if !self.date_range.is_chronological() {
            debug!(
                start = %self.date_range.start,
                end = %self.date_range.end,
                "Date range ends before it starts; sending as entered"
            );
        }

        self.status = RequestStatus::Loading;
        self.error = None;
        self.result = None;
        self.last_dispatched += 1;

        let ticket = RequestTicket { seq: self.last_dispatched, analysis_type: self.analysis_type };

        info!(
            seq = ticket.seq,
            analysis = %ticket.analysis_type,
            sources = request.sources.len(),
            geometry = request.geometry.type_name(),
            "Analysis dispatched"
        );

        Ok(Dispatch { ticket, request })
    }

    /// Build the request body from the current inputs without dispatching.
    ///
    /// Geometry is checked before sources.
    pub fn request(&self) -> std::result::Result<AnalysisRequest, ValidationError> {
        let geometry = self.geometry.ok_or(ValidationError::NoGeometry)?;
        if self.sources.is_empty() {
            return Err(ValidationError::NoSources);
        }
        Ok(AnalysisRequest::new(self.sources.clone(), geometry, self.date_range)
            .with_cloud_cover_max(self.cloud_cover_max))
    }

    /// Reconcile the outcome of a dispatched request.
    ///
    /// Returns `false` when the ticket is stale (a newer request has been
    /// dispatched since) and the outcome was dropped.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        outcome: std::result::Result<AnalysisResult, RemoteError>,
    ) -> bool {
        if ticket.seq != self.last_dispatched {
            debug!(
                seq = ticket.seq,
                latest = self.last_dispatched,
                "Dropping stale analysis response"
            );
            return false;
        }

        match outcome {
            Ok(result) if result.analysis_type() == ticket.analysis_type => {
                info!(seq = ticket.seq, analysis = %ticket.analysis_type, "Analysis succeeded");
                self.result = Some(result);
                self.error = None;
                self.status = RequestStatus::Success;
            }
            Ok(result) => {
                warn!(
                    expected = %ticket.analysis_type,
                    received = %result.analysis_type(),
                    "Analysis result does not match the dispatched type"
                );
                self.result = None;
                self.error = Some(FALLBACK_REMOTE_MESSAGE.to_string());
                self.status = RequestStatus::Error;
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "Analysis failed");
                self.result = None;
                self.error = Some(err.user_message());
                self.status = RequestStatus::Error;
            }
        }
        true
    }

    /// Geometry present and at least one source selected
    pub fn is_ready(&self) -> bool {
        self.geometry.is_some() && !self.sources.is_empty()
    }

    /// Whether the run trigger should be enabled
    pub fn can_trigger(&self) -> bool {
        self.is_ready() && self.status != RequestStatus::Loading
    }

    /// More than one source selected
    pub fn is_fusion(&self) -> bool {
        self.sources.len() > 1
    }

    /// The service buffers point selections by 1 km for land cover
    pub fn point_buffer_notice(&self) -> bool {
        self.analysis_type == AnalysisType::Landcover
            && self.geometry.as_ref().is_some_and(Geometry::is_point)
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selector.mode()
    }

    pub fn selector_state(&self) -> SelectorState {
        self.selector.state()
    }

    /// First corner of a box still waiting for its second click
    pub fn pending_corner(&self) -> Option<Coordinate> {
        self.selector.pending()
    }

    pub fn sources(&self) -> &SourceSelection {
        &self.sources
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    pub fn cloud_cover_max(&self) -> u8 {
        self.cloud_cover_max
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Serializable snapshot of everything the presentation layer shows
    pub fn view(&self) -> PanelView {
        PanelView {
            geometry: self.geometry,
            pending_corner: self.pending_corner(),
            selection_area_km2: self.geometry.as_ref().map(spatial::area_km2),
            selection_extent_km: self.geometry.as_ref().map(spatial::extent_km),
            selection_centroid: self.geometry.as_ref().and_then(spatial::centroid),
            sources: self.sources.clone(),
            date_range: self.date_range,
            analysis_type: self.analysis_type,
            status: self.status,
            error: self.error.clone(),
            result: self.result.clone(),
            fusion: self.is_fusion(),
            point_buffer_notice: self.point_buffer_notice(),
        }
    }
}

/// Outbound state for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub geometry: Option<Geometry>,
    pub pending_corner: Option<Coordinate>,
    pub selection_area_km2: Option<f64>,
    pub selection_extent_km: Option<f64>,
    pub selection_centroid: Option<Coordinate>,
    pub sources: SourceSelection,
    pub date_range: DateRange,
    pub analysis_type: AnalysisType,
    pub status: RequestStatus,
    pub error: Option<String>,
    pub result: Option<AnalysisResult>,
    pub fusion: bool,
    pub point_buffer_notice: bool,
}
