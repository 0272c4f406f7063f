use thiserror::Error;

use crate::types::ApiErrorBody;

/// Main SDK error type
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Non-2xx response from the backend
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: ApiErrorBody },

    /// The request never completed (connect, TLS, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON parse error
    #[error("Json parse error: {0}")]
    JsonParse(String),

    /// Response decoded but is not the shape the endpoint promises
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Orchestrator was asked to run with nothing selected
    #[error("Please select at least one risk.")]
    EmptySelection,

    /// No ticker in the session
    #[error("No ticker in session, sign in first")]
    MissingTicker,

    /// Required form field missing or blank
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A simulation run is already in flight on this orchestrator
    #[error("A simulation run is already in progress")]
    RunInFlight,

    /// Filesystem error (session file, chart output)
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// graph_base64 could not be decoded
    #[error("Graph decode error: {0}")]
    Graph(String),
}

impl Error {
    /// Create a JSON parse error
    pub fn json_parse(msg: impl Into<String>) -> Self {
        Error::JsonParse(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// User-facing message for this error, preferring the backend's own text.
    ///
    /// `fallback` is used when the backend gave no usable message (empty or
    /// unrecognised body) and for transport faults.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Http { body, .. } => body
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            Error::Transport(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }

    /// True for errors raised before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptySelection | Error::MissingTicker | Error::MissingField(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_error() {
        let err = Error::Http {
            status: 500,
            body: ApiErrorBody::Message {
                error: "bad params".to_string(),
            },
        };
        assert_eq!(err.user_message("Simulation failed"), "bad params");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = Error::Http {
            status: 502,
            body: ApiErrorBody::Raw("<html>bad gateway</html>".to_string()),
        };
        assert_eq!(err.user_message("Simulation failed"), "Simulation failed");

        let err = Error::transport("connection refused");
        assert_eq!(err.user_message("Simulation failed"), "Simulation failed");
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::EmptySelection.is_validation());
        assert!(Error::MissingTicker.is_validation());
        assert!(Error::MissingField("ticker").is_validation());
        assert!(!Error::RunInFlight.is_validation());
        assert!(!Error::transport("x").is_validation());
    }
}
