// ─────────────────────────────────────────────────────────────────────
// Lampyris — Order Parameter Observables
// ─────────────────────────────────────────────────────────────────────
//! Kuramoto order parameter R e^{iψ} = (1/N) Σ_k e^{iθ_k}.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use lampyris_types::{SyncError, SyncResult};

/// Unnormalised complex sum (Σ cos θ, Σ sin θ).
fn phasor_sum(phases: &[f64]) -> SyncResult<(f64, f64)> {
    if phases.is_empty() {
        return Err(SyncError::EmptyEnsemble);
    }
    Ok(phases
        .iter()
        .fold((0.0, 0.0), |(c, s), &th| (c + th.cos(), s + th.sin())))
}

/// Coherence R = |Σ e^{iθ_k}| / N ∈ [0, 1].
pub fn order_parameter(phases: &[f64]) -> SyncResult<f64> {
    let (sum_cos, sum_sin) = phasor_sum(phases)?;
    let r = sum_cos.hypot(sum_sin) / phases.len() as f64;
    Ok(r.clamp(0.0, 1.0))
}

/// Mean phase ψ = arg Σ e^{iθ_k} ∈ (−π, π].
pub fn mean_phase(phases: &[f64]) -> SyncResult<f64> {
    let (sum_cos, sum_sin) = phasor_sum(phases)?;
    let psi = sum_sin.atan2(sum_cos);
    Ok(if psi <= -PI { PI } else { psi })
}

/// Order parameter in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderVector {
    pub r: f64,
    pub psi: f64,
}

impl OrderVector {
    pub fn from_phases(phases: &[f64]) -> SyncResult<Self> {
        Ok(Self {
            r: order_parameter(phases)?,
            psi: mean_phase(phases)?,
        })
    }

    /// Cartesian tip (R cos ψ, R sin ψ) of the order arrow.
    pub fn tip(&self) -> (f64, f64) {
        (self.r * self.psi.cos(), self.r * self.psi.sin())
    }
}

/// Position of each oscillator on the unit circle.
pub fn unit_circle_points(phases: &[f64]) -> Vec<(f64, f64)> {
    phases.iter().map(|&th| (th.cos(), th.sin())).collect()
}
