use satfusion_core::error::RemoteError;
use satfusion_core::models::AnalysisResult;
use satfusion_core::ports::AnalysisService;
use std::time::Instant;
use tracing::{debug, info};

use crate::state::{Dispatch, PanelState};

/// Runs analyses against a service and reconciles outcomes into panel state
pub struct AnalysisOrchestrator<S>
where
    S: AnalysisService,
{
    service: S,
}

impl<S> AnalysisOrchestrator<S>
where
    S: AnalysisService,
{
    /// Create a new orchestrator
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validate, dispatch and reconcile one analysis.
    ///
    /// Validation failures are recorded in `state` and nothing is sent.
    /// Calling this while a request is in flight starts a new one; the older
    /// outcome is then discarded when it resolves.
    pub async fn run_analysis(&self, state: &mut PanelState) {
        let Ok(dispatch) = state.begin_analysis() else {
            return;
        };

        let outcome = self.execute(&dispatch).await;
        state.resolve(dispatch.ticket, outcome);
    }

    /// Send a prepared dispatch to the service, routing on its analysis type.
    ///
    /// Does not touch panel state; pair with [`PanelState::resolve`].
    pub async fn execute(&self, dispatch: &Dispatch) -> Result<AnalysisResult, RemoteError> {
        let analysis_type = dispatch.ticket.analysis_type();
        debug!(
            seq = dispatch.ticket.seq(),
            endpoint = analysis_type.endpoint(),
            "Sending analysis request"
        );

        let started = Instant::now();
        let outcome = self.service.analyze(analysis_type, &dispatch.request).await;

        info!(
            seq = dispatch.ticket.seq(),
            analysis = %analysis_type,
            ok = outcome.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Analysis request finished"
        );
        outcome
    }
}
