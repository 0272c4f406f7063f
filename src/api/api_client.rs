use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::{
    api::RiskBackend,
    consts::{PROCESS_TICKER_PATH, RISKS_PATH, SIGNIN_PATH, SIGNUP_PATH, SIMULATE_PATH},
    prelude::*,
    req::HttpClient,
    types::{
        ProcessTickerRequest, ProcessTickerResponse, RiskDescriptor, SignInRequest,
        SignInResponse, SignUpRequest, SimulationRequest, SimulationResult,
    },
    BaseUrl, Error,
};

/// Endpoint paths relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiPaths {
    pub signup: String,
    pub signin: String,
    pub process_ticker: String,
    pub risks: String,
    pub simulate: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            signup: SIGNUP_PATH.to_string(),
            signin: SIGNIN_PATH.to_string(),
            process_ticker: PROCESS_TICKER_PATH.to_string(),
            risks: RISKS_PATH.to_string(),
            simulate: SIMULATE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub http_client: HttpClient,
    pub paths: ApiPaths,
}

impl ApiClient {
    pub fn new(client: Option<Client>, base_url: Option<BaseUrl>) -> ApiClient {
        let client = client.unwrap_or_default();
        let base_url = base_url.unwrap_or_default();

        ApiClient {
            http_client: HttpClient::new(client, &base_url),
            paths: ApiPaths::default(),
        }
    }

    pub fn with_paths(mut self, paths: ApiPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.http_client = self.http_client.with_max_retries(max_retries);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.http_client.base_url
    }

    async fn post_json<R: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        request: &R,
    ) -> Result<T> {
        let data = serde_json::to_string(request).map_err(|e| Error::json_parse(e.to_string()))?;
        let return_data = self.http_client.post(path, data).await?;
        serde_json::from_str(&return_data).map_err(|e| Error::json_parse(e.to_string()))
    }
}

#[async_trait]
impl RiskBackend for ApiClient {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<()> {
        let data = serde_json::to_string(request).map_err(|e| Error::json_parse(e.to_string()))?;
        self.http_client.post(&self.paths.signup, data).await?;
        Ok(())
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse> {
        self.post_json(&self.paths.signin, request).await
    }

    async fn process_ticker(&self, ticker: &str) -> Result<ProcessTickerResponse> {
        let request = ProcessTickerRequest {
            ticker: ticker.to_string(),
        };
        self.post_json(&self.paths.process_ticker, &request).await
    }

    async fn list_risks(&self) -> Result<Vec<RiskDescriptor>> {
        let return_data = self.http_client.get(&self.paths.risks).await?;
        let value: serde_json::Value =
            serde_json::from_str(&return_data).map_err(|e| Error::json_parse(e.to_string()))?;
        if !value.is_array() {
            return Err(Error::UnexpectedResponse(format!(
                "risk catalog is not an array: {value}"
            )));
        }
        let risks: Vec<RiskDescriptor> =
            serde_json::from_value(value).map_err(|e| Error::json_parse(e.to_string()))?;
        debug!(count = risks.len(), "Loaded risk catalog");
        Ok(risks)
    }

    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        self.post_json(&self.paths.simulate, request).await
    }
}
