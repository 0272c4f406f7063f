//! Simulation orchestrator.
//!
//! Turns a [`SelectionSet`] into one simulation request per selected risk and
//! assembles the successful results for rendering.
//!
//! # Guarantees
//! - An empty selection issues no requests and leaves the state untouched.
//! - A failed risk (non-2xx, transport fault, malformed body) produces one
//!   [`Notice::RiskFailed`] and is left out of the results; the batch goes on.
//! - Results and notices follow selection order in every [`ExecutionMode`].
//! - `results` is replaced only after every selected risk has been attempted.
//! - At most one run is in flight per orchestrator; a second `run` is rejected
//!   with [`Error::RunInFlight`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    api::RiskBackend,
    consts::SIMULATION_FAILED,
    notify::{Notice, Notifier},
    prelude::*,
    selection::SelectionSet,
    types::{SimulationParams, SimulationRequest, SimulationResult},
    Error,
};

/// How requests for distinct risks are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One request at a time; each resolves before the next is issued.
    #[default]
    Sequential,
    /// Up to `max_in_flight` requests at once. Each request future carries the
    /// risk it was issued for, so failures stay attributable.
    Concurrent { max_in_flight: usize },
}

impl ExecutionMode {
    pub fn max_in_flight(&self) -> usize {
        match self {
            ExecutionMode::Sequential => 1,
            ExecutionMode::Concurrent { max_in_flight } => (*max_in_flight).max(1),
        }
    }
}

/// A risk whose simulation failed during a run.
#[derive(Debug, Clone)]
pub struct RiskFailure {
    pub risk: String,
    /// Message shown to the user
    pub message: String,
    pub error: Error,
}

/// Outcome of one orchestration run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub results: Vec<SimulationResult>,
    pub failures: Vec<RiskFailure>,
}

impl RunReport {
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Snapshot of the orchestrator's observable state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestrationState {
    pub pending: bool,
    pub results: Vec<SimulationResult>,
}

/// Holds the pending flag for the lifetime of one run, including runs whose
/// future is dropped before completion.
struct RunGuard<'a> {
    pending: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(pending: &'a AtomicBool) -> Option<Self> {
        pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { pending })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.pending.store(false, Ordering::Release);
    }
}

pub struct SimulationOrchestrator {
    backend: Arc<dyn RiskBackend>,
    params: SimulationParams,
    mode: ExecutionMode,
    pending: AtomicBool,
    results: Mutex<Vec<SimulationResult>>,
}

impl std::fmt::Debug for SimulationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationOrchestrator")
            .field("params", &self.params)
            .field("mode", &self.mode)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl SimulationOrchestrator {
    pub fn new(backend: Arc<dyn RiskBackend>) -> Self {
        Self {
            backend,
            params: SimulationParams::default(),
            mode: ExecutionMode::default(),
            pending: AtomicBool::new(false),
            results: Mutex::new(Vec::new()),
        }
    }

    pub fn with_params(mut self, params: SimulationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Loading signal: true while a run is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Results of the last completed run.
    pub fn results(&self) -> Vec<SimulationResult> {
        self.lock_results().clone()
    }

    pub fn state(&self) -> OrchestrationState {
        OrchestrationState {
            pending: self.is_pending(),
            results: self.results(),
        }
    }

    /// Drop the last run's results (page unmount).
    pub fn reset(&self) {
        self.lock_results().clear();
    }

    /// Simulate every selected risk and replace the stored results.
    ///
    /// Per-risk failures are reported to `notifier` and collected in the
    /// report; they never fail the run. The only errors returned are
    /// [`Error::EmptySelection`] and [`Error::RunInFlight`], both before any
    /// request is issued.
    pub async fn run(
        &self,
        selection: &SelectionSet,
        notifier: &dyn Notifier,
    ) -> Result<RunReport> {
        if selection.is_empty() {
            let err = Error::EmptySelection;
            notifier.notify(Notice::validation(err.to_string()));
            return Err(err);
        }

        let _guard = RunGuard::acquire(&self.pending).ok_or_else(|| {
            warn!("Simulation run rejected, another run is in flight");
            Error::RunInFlight
        })?;

        info!(
            risks = selection.len(),
            mode = ?self.mode,
            mean = self.params.mean,
            stddev = self.params.stddev,
            simulations = self.params.simulations,
            "Starting simulation run"
        );

        let params = self.params;
        // `buffered` yields in input order; with a limit of 1 the next request
        // is not created until the previous one has resolved.
        let mut outcomes = stream::iter(selection.iter().map(str::to_string))
            .map(|risk| async move {
                let request = SimulationRequest::new(risk.clone(), &params);
                debug!(risk = %risk, "Issuing simulation request");
                let outcome = self.backend.simulate(&request).await;
                (risk, outcome)
            })
            .buffered(self.mode.max_in_flight());

        let mut report = RunReport::default();
        while let Some((risk, outcome)) = outcomes.next().await {
            match outcome {
                Ok(result) => {
                    if result.risk != risk {
                        warn!(
                            requested = %risk,
                            returned = %result.risk,
                            "Backend echoed a different risk name"
                        );
                    }
                    debug!(
                        risk = %risk,
                        min_loss = result.min_loss,
                        avg_loss = result.avg_loss,
                        max_loss = result.max_loss,
                        "Simulation succeeded"
                    );
                    report.results.push(result);
                }
                Err(error) => {
                    let message = error.user_message(SIMULATION_FAILED);
                    warn!(risk = %risk, error = %error, "Simulation failed");
                    notifier.notify(Notice::risk_failed(&risk, &message));
                    report.failures.push(RiskFailure {
                        risk,
                        message,
                        error,
                    });
                }
            }
        }

        *self.lock_results() = report.results.clone();

        info!(
            succeeded = report.results.len(),
            failed = report.failures.len(),
            "Simulation run complete"
        );
        Ok(report)
    }

    fn lock_results(&self) -> std::sync::MutexGuard<'_, Vec<SimulationResult>> {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
