pub mod api_client;
pub mod backend;

pub use api_client::{ApiClient, ApiPaths};
pub use backend::RiskBackend;
