//! User-visible notifications.
//!
//! Every failure path in the page flows, the catalog loader and the
//! orchestrator ends in exactly one [`Notice`] delivered to a [`Notifier`].

use std::sync::Mutex;

/// Operation a notice is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SignUp,
    SignIn,
    ProcessTicker,
    LoadCatalog,
    Simulate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::SignUp => "Sign up",
            Operation::SignIn => "Sign in",
            Operation::ProcessTicker => "Process ticker",
            Operation::LoadCatalog => "Load risk catalog",
            Operation::Simulate => "Simulate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Input rejected before any network call
    Validation { message: String },
    /// One risk of a simulation batch failed; the batch continued
    RiskFailed { risk: String, message: String },
    /// A whole operation failed
    Failed {
        operation: Operation,
        message: String,
    },
}

impl Notice {
    pub fn validation(message: impl Into<String>) -> Self {
        Notice::Validation {
            message: message.into(),
        }
    }

    pub fn risk_failed(risk: impl Into<String>, message: impl Into<String>) -> Self {
        Notice::RiskFailed {
            risk: risk.into(),
            message: message.into(),
        }
    }

    pub fn failed(operation: Operation, message: impl Into<String>) -> Self {
        Notice::Failed {
            operation,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Validation { message } => write!(f, "{message}"),
            Notice::RiskFailed { risk, message } => {
                write!(f, "Simulation failed for risk \"{risk}\": {message}")
            }
            Notice::Failed { operation, message } => write!(f, "{operation}: {message}"),
        }
    }
}

/// Sink for user-visible notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Keeps every notice in arrival order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }
}
