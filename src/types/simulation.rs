//! Simulation request/response types.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MEAN, DEFAULT_SIMULATIONS, DEFAULT_STDDEV};
use crate::Error;

/// Loss distribution parameters applied to every risk in a run.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Mean loss in dollars
    pub mean: f64,
    /// Standard deviation of the loss in dollars
    pub stddev: f64,
    /// Number of Monte Carlo draws
    pub simulations: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            mean: DEFAULT_MEAN,
            stddev: DEFAULT_STDDEV,
            simulations: DEFAULT_SIMULATIONS,
        }
    }
}

impl SimulationParams {
    /// Reject parameters the backend cannot sample from.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.mean.is_finite() {
            return Err(Error::Config(format!("mean must be finite, got {}", self.mean)));
        }
        if !self.stddev.is_finite() || self.stddev < 0.0 {
            return Err(Error::Config(format!(
                "stddev must be finite and non-negative, got {}",
                self.stddev
            )));
        }
        if self.simulations == 0 {
            return Err(Error::Config("simulations must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Body of `POST /api/simulate`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SimulationRequest {
    pub risk: String,
    pub mean: f64,
    pub stddev: f64,
    pub simulations: u32,
}

impl SimulationRequest {
    pub fn new(risk: impl Into<String>, params: &SimulationParams) -> Self {
        Self {
            risk: risk.into(),
            mean: params.mean,
            stddev: params.stddev,
            simulations: params.simulations,
        }
    }
}

/// Aggregated statistics and chart for one simulated risk.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SimulationResult {
    pub risk: String,
    pub min_loss: f64,
    pub max_loss: f64,
    pub avg_loss: f64,
    /// Base64-encoded PNG histogram
    pub graph_base64: String,
}

impl SimulationResult {
    /// `min_loss <= avg_loss <= max_loss`, all finite.
    pub fn is_consistent(&self) -> bool {
        self.min_loss.is_finite()
            && self.max_loss.is_finite()
            && self.avg_loss.is_finite()
            && self.min_loss <= self.avg_loss
            && self.avg_loss <= self.max_loss
    }

    /// Decode the distribution chart into raw PNG bytes.
    pub fn decode_graph(&self) -> Result<Vec<u8>, Error> {
        STANDARD
            .decode(self.graph_base64.trim())
            .map_err(|e| Error::Graph(format!("{}: {e}", self.risk)))
    }
}
