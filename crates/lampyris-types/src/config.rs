// ─────────────────────────────────────────────────────────────────────
// Lampyris — Simulation Parameters
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Immutable configuration for one simulation run.
///
/// Shared read-only by every model of a comparison; a driver never
/// mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Number of oscillators N.
    /// Default: 50.
    pub n: usize,

    /// Coupling strength K.
    /// Default: 2.0.
    pub k: f64,

    /// Euler time step.
    /// Default: 0.05.
    pub dt: f64,

    /// Number of update steps recorded.
    /// Default: 500.
    pub steps: usize,

    /// Mean of the natural-frequency distribution (rad per unit time).
    /// Default: 1.0.
    pub omega_mean: f64,

    /// Standard deviation of the natural-frequency distribution.
    /// Default: 0.1.
    pub omega_std: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            n: 50,
            k: 2.0,
            dt: 0.05,
            steps: 500,
            omega_mean: 1.0,
            omega_std: 0.1,
        }
    }
}

impl SimulationParams {
    /// Validate every field. Nothing is clamped.
    pub fn validate(&self) -> SyncResult<()> {
        if self.n == 0 {
            return Err(SyncError::InvalidParameters(
                "n must be >= 1, got 0".to_string(),
            ));
        }
        if self.steps == 0 {
            return Err(SyncError::InvalidParameters(
                "steps must be >= 1, got 0".to_string(),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SyncError::InvalidParameters(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if !(self.omega_std.is_finite() && self.omega_std >= 0.0) {
            return Err(SyncError::InvalidParameters(format!(
                "omega_std must be finite and >= 0, got {}",
                self.omega_std
            )));
        }
        if !self.k.is_finite() {
            return Err(SyncError::InvalidParameters(format!(
                "k must be finite, got {}",
                self.k
            )));
        }
        if !self.omega_mean.is_finite() {
            return Err(SyncError::InvalidParameters(format!(
                "omega_mean must be finite, got {}",
                self.omega_mean
            )));
        }
        Ok(())
    }

    /// Total simulated time covered by a run.
    pub fn duration(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        serde_json::from_str(json).map_err(|e| SyncError::Config(format!("JSON parse error: {e}")))
    }
}
