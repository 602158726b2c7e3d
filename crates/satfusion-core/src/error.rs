//! Error types for SatFusion

use thiserror::Error;

/// Message shown when a remote failure carries no usable `detail`.
pub const FALLBACK_REMOTE_MESSAGE: &str = "Analysis failed. Please try again.";

#[derive(Debug, Error)]
pub enum FusionError {
    // Geometry errors
    #[error("Invalid coordinate (lat {lat}, lng {lng}): {reason}")]
    InvalidCoordinate { lat: f64, lng: f64, reason: String },

    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Parameter errors
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Unknown satellite source: {id}")]
    UnknownSource { id: String },

    #[error("Unknown analysis type: {name}. Use landcover, ndvi, or compare")]
    UnknownAnalysisType { name: String },

    #[error("Unknown selection mode: {name}. Use point or polygon")]
    UnknownSelectionMode { name: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, FusionError>;

/// Local precondition failure. Never reaches the network layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a location on the map")]
    NoGeometry,

    #[error("Please select at least one satellite source")]
    NoSources,
}

/// Failure of an outbound call to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced an HTTP response (connect, timeout, ...)
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    /// The service answered with a non-success status
    #[error("service rejected request with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    /// A success response whose body did not match the expected shape
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl RemoteError {
    /// Human-readable message for display.
    ///
    /// Uses the service-provided `detail` when there is one, otherwise
    /// [`FALLBACK_REMOTE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            RemoteError::Rejected { detail: Some(detail), .. } if !detail.is_empty() => {
                detail.clone()
            }
            _ => FALLBACK_REMOTE_MESSAGE.to_string(),
        }
    }
}
