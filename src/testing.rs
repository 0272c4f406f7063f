//! Scripted in-memory backend for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    api::RiskBackend,
    prelude::*,
    types::{
        ProcessTickerResponse, RiskDescriptor, SignInRequest, SignInResponse, SignUpRequest,
        SimulationRequest, SimulationResult,
    },
    Error,
};

pub(crate) fn sample_result(risk: &str) -> SimulationResult {
    SimulationResult {
        risk: risk.to_string(),
        min_loss: -120_000.25,
        max_loss: 2_180_000.75,
        avg_loss: 1_000_412.5,
        graph_base64: "iVBORw0KGgo=".to_string(),
    }
}

pub(crate) struct ScriptedBackend {
    catalog: Result<Vec<RiskDescriptor>>,
    simulations: HashMap<String, Result<SimulationResult>>,
    delays: HashMap<String, Duration>,
    process: Result<ProcessTickerResponse>,
    sign_in: Result<SignInResponse>,
    sign_up: Result<()>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self {
            catalog: Ok(Vec::new()),
            simulations: HashMap::new(),
            delays: HashMap::new(),
            process: Ok(ProcessTickerResponse::default()),
            sign_in: Err(Error::transport("sign_in not scripted")),
            sign_up: Ok(()),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_catalog(mut self, catalog: Result<Vec<RiskDescriptor>>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Unscripted risks succeed with [`sample_result`].
    pub(crate) fn with_simulation(mut self, risk: &str, outcome: Result<SimulationResult>) -> Self {
        self.simulations.insert(risk.to_string(), outcome);
        self
    }

    pub(crate) fn with_delay(mut self, risk: &str, delay: Duration) -> Self {
        self.delays.insert(risk.to_string(), delay);
        self
    }

    pub(crate) fn with_process_ticker(mut self, outcome: Result<ProcessTickerResponse>) -> Self {
        self.process = outcome;
        self
    }

    pub(crate) fn with_sign_in(mut self, outcome: Result<SignInResponse>) -> Self {
        self.sign_in = outcome;
        self
    }

    pub(crate) fn with_sign_up(mut self, outcome: Result<()>) -> Self {
        self.sign_up = outcome;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub(crate) fn catalog_calls(&self) -> usize {
        self.calls().iter().filter(|c| *c == "list_risks").count()
    }

    /// Risk names passed to `simulate`, in issue order.
    pub(crate) fn simulated(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.strip_prefix("simulate:").map(str::to_string))
            .collect()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

#[async_trait]
impl RiskBackend for ScriptedBackend {
    async fn sign_up(&self, _request: &SignUpRequest) -> Result<()> {
        self.record("sign_up".to_string());
        self.sign_up.clone()
    }

    async fn sign_in(&self, _request: &SignInRequest) -> Result<SignInResponse> {
        self.record("sign_in".to_string());
        self.sign_in.clone()
    }

    async fn process_ticker(&self, ticker: &str) -> Result<ProcessTickerResponse> {
        self.record(format!("process_ticker:{ticker}"));
        self.process.clone()
    }

    async fn list_risks(&self) -> Result<Vec<RiskDescriptor>> {
        self.record("list_risks".to_string());
        self.catalog.clone()
    }

    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        self.record(format!("simulate:{}", request.risk));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&request.risk) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.simulations
            .get(&request.risk)
            .cloned()
            .unwrap_or_else(|| Ok(sample_result(&request.risk)))
    }
}
