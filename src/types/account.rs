//! Account and ticker-processing types.

use serde::{Deserialize, Serialize};

/// Body of `POST /signup`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub ticker: String,
}

/// Body of `POST /signin`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Successful sign-in: the ticker registered for this user.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SignInResponse {
    pub ticker: String,
}

/// Body of `POST /process_ticker`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ProcessTickerRequest {
    pub ticker: String,
}

/// Ticker processing response.
///
/// `risks` is absent when extraction failed; the backend then sends
/// `{"error": ...}` instead, sometimes with a 2xx status.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ProcessTickerResponse {
    #[serde(default)]
    pub risks: Option<Vec<serde_json::Value>>,
}

impl ProcessTickerResponse {
    /// Risk names from the response, accepting plain strings or `{risk}` records.
    pub fn risk_names(&self) -> Option<Vec<String>> {
        let risks = self.risks.as_ref()?;
        Some(
            risks
                .iter()
                .filter_map(|value| match value {
                    serde_json::Value::String(name) => Some(name.clone()),
                    serde_json::Value::Object(map) => map
                        .get("risk")
                        .or_else(|| map.get("Risk"))
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                    _ => None,
                })
                .collect(),
        )
    }
}
