//! End-to-end simulator page flow against a mocked backend.

use std::sync::Arc;

use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;

use risk_simulator::{
    flows, ApiClient, BaseUrl, Notice, Operation, RecordingNotifier, RiskBackend, RiskCatalog,
    Route, SelectionSet, Session, SimulationOrchestrator,
};

fn simulation_body(risk: &str) -> serde_json::Value {
    json!({
        "risk": risk,
        "mean": 1_000_000.0,
        "stddev": 300_000.0,
        "simulations": 10_000,
    })
}

fn result_body(risk: &str) -> serde_json::Value {
    json!({
        "risk": risk,
        "min_loss": -98_765.43,
        "max_loss": 2_234_567.89,
        "avg_loss": 1_001_234.56,
        "graph_base64": "iVBORw0KGgo=",
    })
}

fn backend_for(server: &MockServer) -> Arc<dyn RiskBackend> {
    Arc::new(ApiClient::new(None, Some(BaseUrl::Custom(server.base_url()))))
}

#[tokio::test]
async fn catalog_select_and_simulate_both() {
    let server = MockServer::start_async().await;
    let catalog_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/risks");
            then.status(200)
                .json_body(json!([{"risk": "Market"}, {"risk": "Credit"}]));
        })
        .await;
    let market = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/simulate")
                .json_body(simulation_body("Market"));
            then.status(200).json_body(result_body("Market"));
        })
        .await;
    let credit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/simulate")
                .json_body(simulation_body("Credit"));
            then.status(200).json_body(result_body("Credit"));
        })
        .await;

    let backend = backend_for(&server);
    let notifier = RecordingNotifier::new();

    let mut catalog = RiskCatalog::new();
    catalog.activate(backend.as_ref(), &notifier).await;
    let mut selection = SelectionSet::new();
    for risk in catalog.risks() {
        selection.toggle(risk.name());
    }

    let orchestrator = SimulationOrchestrator::new(backend.clone());
    let report = orchestrator.run(&selection, &notifier).await.unwrap();

    let names: Vec<&str> = report.results.iter().map(|r| r.risk.as_str()).collect();
    assert_eq!(names, vec!["Market", "Credit"]);
    assert!(report.results.iter().all(|r| r.is_consistent()));
    assert!(notifier.is_empty());
    assert!(!orchestrator.is_pending());

    catalog_mock.assert_hits_async(1).await;
    market.assert_hits_async(1).await;
    credit.assert_hits_async(1).await;
}

#[tokio::test]
async fn failing_risk_is_isolated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/simulate")
                .json_body(simulation_body("Market"));
            then.status(400).json_body(json!({"error": "bad params"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/simulate")
                .json_body(simulation_body("Credit"));
            then.status(200).json_body(result_body("Credit"));
        })
        .await;

    let backend = backend_for(&server);
    let notifier = RecordingNotifier::new();
    let selection: SelectionSet = ["Market", "Credit"].into_iter().collect();

    let orchestrator = SimulationOrchestrator::new(backend);
    orchestrator.run(&selection, &notifier).await.unwrap();

    let results = orchestrator.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].risk, "Credit");
    assert_eq!(
        notifier.notices(),
        vec![Notice::risk_failed("Market", "bad params")]
    );
}

#[tokio::test]
async fn malformed_success_body_counts_as_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/simulate");
            then.status(200).json_body(json!({"risk": "Market", "min_loss": 1.0}));
        })
        .await;

    let notifier = RecordingNotifier::new();
    let selection: SelectionSet = ["Market"].into_iter().collect();
    let orchestrator = SimulationOrchestrator::new(backend_for(&server));

    let report = orchestrator.run(&selection, &notifier).await.unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(notifier.len(), 1);
}

#[tokio::test]
async fn empty_selection_makes_no_calls() {
    let server = MockServer::start_async().await;
    let simulate = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/simulate");
            then.status(200).json_body(result_body("Market"));
        })
        .await;

    let notifier = RecordingNotifier::new();
    let orchestrator = SimulationOrchestrator::new(backend_for(&server));

    assert!(orchestrator
        .run(&SelectionSet::new(), &notifier)
        .await
        .is_err());
    simulate.assert_hits_async(0).await;
    assert_eq!(notifier.len(), 1);
}

#[tokio::test]
async fn loading_page_without_ticker_redirects() {
    let server = MockServer::start_async().await;
    let process = server
        .mock_async(|when, then| {
            when.method(POST).path("/process_ticker");
            then.status(200).json_body(json!({"risks": []}));
        })
        .await;

    let backend = backend_for(&server);
    let notifier = RecordingNotifier::new();
    let mut session = Session::new();

    let route = flows::prepare_risks(backend.as_ref(), &notifier, &mut session)
        .await
        .unwrap();

    assert_eq!(route, Route::SignIn);
    process.assert_hits_async(0).await;
}

#[tokio::test]
async fn missing_risk_file_is_reported() {
    let server = MockServer::start_async().await;
    let catalog_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/risks");
            then.status(404)
                .json_body(json!({"error": "Risk file not found."}));
        })
        .await;

    let backend = backend_for(&server);
    let notifier = RecordingNotifier::new();
    let mut catalog = RiskCatalog::new();

    assert!(catalog.activate(backend.as_ref(), &notifier).await.is_empty());
    assert!(catalog.has_failed());
    assert_eq!(
        notifier.notices(),
        vec![Notice::failed(Operation::LoadCatalog, "Risk file not found.")]
    );
    catalog_mock.assert_hits_async(1).await;
}
