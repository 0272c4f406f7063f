use reqwest::{Client, Method, Response};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{prelude::*, types::ApiErrorBody, BaseUrl, Error};

/// HTTP status codes that indicate transient server errors (retryable)
const RETRYABLE_STATUS_CODES: &[u16] = &[502, 503, 504];

/// Initial backoff delay in milliseconds (doubles with each retry)
const INITIAL_BACKOFF_MS: u64 = 100;

#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: Client,
    pub base_url: String,
    /// Extra attempts on 502/503/504. Zero keeps every call single-shot.
    pub max_retries: u32,
}

async fn parse_response(response: Response) -> Result<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::transport(e.to_string()))?;

    if status.is_success() {
        return Ok(text);
    }

    Err(Error::Http {
        status: status.as_u16(),
        body: ApiErrorBody::parse(&text),
    })
}

impl HttpClient {
    pub fn new(client: Client, base_url: &BaseUrl) -> Self {
        Self {
            client,
            base_url: base_url.get_url(),
            max_retries: 0,
        }
    }

    /// Build the underlying reqwest client with an optional per-request timeout.
    pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub async fn get(&self, url_path: &str) -> Result<String> {
        self.send(Method::GET, url_path, None).await
    }

    pub async fn post(&self, url_path: &str, data: String) -> Result<String> {
        self.send(Method::POST, url_path, Some(data)).await
    }

    /// Send a request, retrying transient server errors (502, 503, 504) with
    /// exponential backoff (100ms, 200ms, 400ms, ...) up to `max_retries` times.
    async fn send(&self, method: Method, url_path: &str, data: Option<String>) -> Result<String> {
        let full_url = format!("{}{url_path}", self.base_url);

        for attempt in 0..=self.max_retries {
            let mut builder = self.client.request(method.clone(), &full_url);
            if let Some(body) = &data {
                builder = builder
                    .header("Content-Type", "application/json")
                    .body(body.clone());
            }
            let request = builder.build().map_err(|e| Error::transport(e.to_string()))?;

            debug!(method = %method, url = %full_url, attempt = attempt + 1, "Sending request");

            let result = self
                .client
                .execute(request)
                .await
                .map_err(|e| Error::transport(e.to_string()))?;

            let status = result.status().as_u16();

            if RETRYABLE_STATUS_CODES.contains(&status) && attempt < self.max_retries {
                let backoff = Duration::from_millis(INITIAL_BACKOFF_MS * 2u64.pow(attempt));
                warn!(
                    status = status,
                    attempt = attempt + 1,
                    max_attempts = self.max_retries + 1,
                    backoff_ms = backoff.as_millis(),
                    url = %url_path,
                    "Retryable HTTP error, backing off"
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            return parse_response(result).await;
        }

        Err(Error::transport(format!(
            "Max retries ({}) exceeded for {url_path}",
            self.max_retries
        )))
    }
}
