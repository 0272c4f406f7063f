//! TOML configuration.
//!
//! Every field has a default, so an absent file or an empty section yields
//! the stock behavior: local backend, single-shot requests, sequential runs
//! with mean 1,000,000 / stddev 300,000 / 10,000 draws.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    api::ApiPaths,
    consts::{DEFAULT_MEAN, DEFAULT_SIMULATIONS, DEFAULT_STDDEV, LOCAL_API_URL},
    logging::LogConfig,
    orchestrator::ExecutionMode,
    prelude::*,
    types::SimulationParams,
    BaseUrl, Error,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NetworkConfig {
    /// Backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. Unset means requests may wait forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Extra attempts on 502/503/504
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub paths: ApiPaths,
}

fn default_base_url() -> String {
    LOCAL_API_URL.to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            max_retries: 0,
            paths: ApiPaths::default(),
        }
    }
}

impl NetworkConfig {
    pub fn base_url(&self) -> BaseUrl {
        BaseUrl::from(self.base_url.as_str())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    Sequential,
    Concurrent,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_mean")]
    pub mean: f64,
    #[serde(default = "default_stddev")]
    pub stddev: f64,
    #[serde(default = "default_simulations")]
    pub simulations: u32,
    #[serde(default)]
    pub mode: RunMode,
    /// Request limit for concurrent mode
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_mean() -> f64 {
    DEFAULT_MEAN
}

fn default_stddev() -> f64 {
    DEFAULT_STDDEV
}

fn default_simulations() -> u32 {
    DEFAULT_SIMULATIONS
}

fn default_max_in_flight() -> usize {
    4
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mean: default_mean(),
            stddev: default_stddev(),
            simulations: default_simulations(),
            mode: RunMode::default(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl SimulationConfig {
    pub fn params(&self) -> SimulationParams {
        SimulationParams {
            mean: self.mean,
            stddev: self.stddev,
            simulations: self.simulations,
        }
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        match self.mode {
            RunMode::Sequential => ExecutionMode::Sequential,
            RunMode::Concurrent => ExecutionMode::Concurrent {
                max_in_flight: self.max_in_flight,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionConfig {
    /// Session file location
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".risk_simulator").join("session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.params().validate()?;
        if self.simulation.mode == RunMode::Concurrent && self.simulation.max_in_flight == 0 {
            return Err(Error::Config(
                "max_in_flight must be at least 1 in concurrent mode".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
