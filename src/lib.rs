#![deny(unreachable_pub)]

// Core modules
pub mod consts;
mod errors;
mod helpers;
mod prelude;
mod req;

pub mod types;

// Feature modules
pub mod api;
pub mod catalog;
pub mod config;
pub mod flows;
pub mod logging;
pub mod notify;
pub mod orchestrator;
pub mod render;
pub mod selection;
pub mod session;

#[cfg(test)]
mod testing;

// Re-exports
pub use api::{ApiClient, ApiPaths, RiskBackend};
pub use catalog::RiskCatalog;
pub use config::AppConfig;
pub use consts::LOCAL_API_URL;
pub use errors::Error;
pub use flows::Route;
pub use helpers::BaseUrl;
pub use notify::{Notice, Notifier, Operation, RecordingNotifier};
pub use orchestrator::{
    ExecutionMode, OrchestrationState, RiskFailure, RunReport, SimulationOrchestrator,
};
pub use req::HttpClient;
pub use selection::SelectionSet;
pub use session::{Session, SessionStore};
pub use types::*;
