//! Backend error envelope.

use serde::Deserialize;

/// Decoded body of a non-2xx response.
///
/// The backend does not use one error shape for every failure cause, so
/// the body is classified instead of assuming `{"error": string}`.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiErrorBody {
    /// `{"error": "..."}`
    Message { error: String },
    /// `{"message": "..."}`
    Detail { message: String },
    /// Any other non-empty body (HTML error pages, unknown JSON)
    Raw(String),
    /// No body
    Empty,
}

#[derive(Deserialize)]
struct Envelope {
    error: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ApiErrorBody::Empty;
        }
        match serde_json::from_str::<Envelope>(trimmed) {
            Ok(Envelope {
                error: Some(serde_json::Value::String(error)),
                ..
            }) if !error.is_empty() => ApiErrorBody::Message { error },
            Ok(Envelope {
                message: Some(serde_json::Value::String(message)),
                ..
            }) if !message.is_empty() => ApiErrorBody::Detail { message },
            _ => ApiErrorBody::Raw(trimmed.to_string()),
        }
    }

    /// Human-readable message carried by the body, if it has one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiErrorBody::Message { error } => Some(error),
            ApiErrorBody::Detail { message } => Some(message),
            ApiErrorBody::Raw(_) | ApiErrorBody::Empty => None,
        }
    }
}

impl std::fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorBody::Message { error } => write!(f, "{error}"),
            ApiErrorBody::Detail { message } => write!(f, "{message}"),
            ApiErrorBody::Raw(text) => write!(f, "{text}"),
            ApiErrorBody::Empty => write!(f, "<empty body>"),
        }
    }
}
