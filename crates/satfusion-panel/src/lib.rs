//! SatFusion Panel - Control panel state and analysis orchestration
//!
//! This crate owns the panel state (selection, sources, dates, analysis
//! type, request status) and drives analyses through the
//! [`AnalysisService`](satfusion_core::ports::AnalysisService) port.

pub mod orchestrator;
pub mod state;

pub use orchestrator::AnalysisOrchestrator;
pub use state::{Dispatch, PanelEvent, PanelState, PanelView, RequestTicket};
