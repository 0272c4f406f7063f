use async_trait::async_trait;

use crate::{
    prelude::*,
    types::{
        ProcessTickerResponse, RiskDescriptor, SignInRequest, SignInResponse, SignUpRequest,
        SimulationRequest, SimulationResult,
    },
};

/// Trait for the risk backend.
/// Abstracts the HTTP client so page flows and the orchestrator can be
/// driven by a scripted backend in tests.
#[async_trait]
pub trait RiskBackend: Send + Sync {
    /// Register a user with their tracked ticker. Body of a 2xx is ignored.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<()>;

    /// Authenticate and return the user's ticker.
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse>;

    /// Run risk extraction for a ticker.
    ///
    /// A 2xx body without `risks` is returned as-is; callers decide whether
    /// that counts as failure.
    async fn process_ticker(&self, ticker: &str) -> Result<ProcessTickerResponse>;

    /// Fetch the selectable risk catalog.
    ///
    /// Fails with `Error::UnexpectedResponse` when the body is not a JSON array.
    async fn list_risks(&self) -> Result<Vec<RiskDescriptor>>;

    /// Simulate one risk.
    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult>;
}
