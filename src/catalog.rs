//! Risk catalog loader.

use tracing::{info, warn};

use crate::{
    api::RiskBackend,
    consts::{CATALOG_FAILED, CATALOG_UNEXPECTED},
    notify::{Notice, Notifier, Operation},
    types::RiskDescriptor,
    Error,
};

#[derive(Debug, Clone, PartialEq)]
enum CatalogState {
    Inactive,
    Loaded(Vec<RiskDescriptor>),
    Failed,
}

/// Selectable risks, fetched once per catalog lifetime.
///
/// A failed load is final: the catalog stays empty until a new
/// `RiskCatalog` is created.
#[derive(Debug, Clone)]
pub struct RiskCatalog {
    state: CatalogState,
}

impl Default for RiskCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskCatalog {
    pub fn new() -> Self {
        Self {
            state: CatalogState::Inactive,
        }
    }

    /// Fetch the catalog on first call; later calls return what the first produced.
    pub async fn activate(
        &mut self,
        backend: &dyn RiskBackend,
        notifier: &dyn Notifier,
    ) -> &[RiskDescriptor] {
        if self.state == CatalogState::Inactive {
            self.state = match backend.list_risks().await {
                Ok(risks) => {
                    info!(count = risks.len(), "Risk catalog loaded");
                    CatalogState::Loaded(risks)
                }
                Err(err) => {
                    warn!(error = %err, "Risk catalog load failed");
                    let message = match &err {
                        Error::UnexpectedResponse(_) | Error::JsonParse(_) => {
                            CATALOG_UNEXPECTED.to_string()
                        }
                        other => other.user_message(CATALOG_FAILED),
                    };
                    notifier.notify(Notice::failed(Operation::LoadCatalog, message));
                    CatalogState::Failed
                }
            };
        }
        self.risks()
    }

    pub fn risks(&self) -> &[RiskDescriptor] {
        match &self.state {
            CatalogState::Loaded(risks) => risks,
            CatalogState::Inactive | CatalogState::Failed => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.risks().iter().any(|r| r.name() == name)
    }

    pub fn is_activated(&self) -> bool {
        self.state != CatalogState::Inactive
    }

    pub fn has_failed(&self) -> bool {
        self.state == CatalogState::Failed
    }
}
