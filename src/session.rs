//! Client-side session context.
//!
//! Holds the signed-in ticker and the risk list produced by ticker
//! processing. Pages receive a `Session` explicitly; `SessionStore` persists
//! it between CLI invocations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{prelude::*, Error};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ticker: Option<String>,
    #[serde(default)]
    risks: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref()
    }

    /// The ticker, or `Error::MissingTicker` when nobody is signed in.
    pub fn require_ticker(&self) -> Result<&str> {
        self.ticker().ok_or(Error::MissingTicker)
    }

    /// Store a new ticker. A different ticker invalidates the extracted risks.
    pub fn set_ticker(&mut self, ticker: impl Into<String>) {
        let ticker = ticker.into().trim().to_uppercase();
        if self.ticker.as_deref() != Some(ticker.as_str()) {
            self.risks.clear();
        }
        self.ticker = Some(ticker);
    }

    pub fn risks(&self) -> &[String] {
        &self.risks
    }

    pub fn set_risks(&mut self, risks: Vec<String>) {
        self.risks = risks;
    }

    pub fn clear(&mut self) {
        self.ticker = None;
        self.risks.clear();
    }
}

/// JSON file holding one [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file is an empty session.
    pub fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No session file, starting empty");
            return Ok(Session::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::json_parse(format!("session file {}: {e}", self.path.display()))
        })
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content =
            serde_json::to_string_pretty(session).map_err(|e| Error::json_parse(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Remove the session file if present.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
