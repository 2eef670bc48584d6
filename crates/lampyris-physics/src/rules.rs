// ─────────────────────────────────────────────────────────────────────
// Lampyris — Phase Update Rules
// ─────────────────────────────────────────────────────────────────────
//! Explicit Euler step for mean-field oscillator ensembles:
//!
//!   θ_i ← θ_i + (ω_i + (K/N) Σ_j Γ(θ_j − θ_i)) · dt   (mod 2π)
//!
//! with pair kernel
//!
//!   Kuramoto: Γ(Δ) = sin Δ
//!   Winfree:  Γ(Δ) = 1 + cos Δ
//!
//! The sum runs over every ordered pair including j = i. For Winfree the
//! self-pair adds a constant 2 per oscillator; this is part of the model
//! as used here and must not be dropped.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use lampyris_types::{SyncError, SyncResult};

/// Reduce a phase into [0, 2π).
#[inline]
pub fn wrap_phase(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// One mean-field phase-coupling model.
///
/// Implementors supply the pair kernel; the Euler step is shared.
pub trait PhaseUpdateRule {
    /// Display name; unique key in a comparison.
    fn name(&self) -> &str;

    /// Coupling contribution of the ordered pair (i, j), given
    /// `delta = θ_j − θ_i`.
    fn pair_coupling(&self, delta: f64) -> f64;

    /// Advance `phases` by one step **in place**.
    ///
    /// The previous ensemble is overwritten; copy it first if it is
    /// still needed. Every coupling sum is taken from the pre-step
    /// ensemble. `coupling` is scratch space, resized as required.
    ///
    /// Fails with `ShapeMismatch` when `phases` and `omega` differ in
    /// length or are empty, and with `NonFinitePhase` when the update
    /// overflows. `phases` is left untouched on failure.
    fn step_with_scratch(
        &self,
        phases: &mut [f64],
        omega: &[f64],
        k: f64,
        dt: f64,
        coupling: &mut Vec<f64>,
    ) -> SyncResult<()> {
        let n = phases.len();
        if n == 0 || omega.len() != n {
            return Err(SyncError::ShapeMismatch {
                phases: n,
                frequencies: omega.len(),
            });
        }

        coupling.clear();
        coupling.resize(n, 0.0);

        // O(N²) pair sums over the pre-step ensemble
        for (i, c) in coupling.iter_mut().enumerate() {
            let theta_i = phases[i];
            *c = phases
                .iter()
                .map(|&theta_j| self.pair_coupling(theta_j - theta_i))
                .sum();
        }

        let scale = k / n as f64;
        for (i, c) in coupling.iter_mut().enumerate() {
            let advanced = phases[i] + (omega[i] + scale * *c) * dt;
            if !advanced.is_finite() {
                return Err(SyncError::NonFinitePhase { index: i });
            }
            *c = advanced;
        }
        for (theta, &advanced) in phases.iter_mut().zip(coupling.iter()) {
            *theta = wrap_phase(advanced);
        }
        Ok(())
    }

    /// Advance `phases` by one step in place, allocating scratch.
    fn step(&self, phases: &mut [f64], omega: &[f64], k: f64, dt: f64) -> SyncResult<()> {
        let mut coupling = Vec::with_capacity(phases.len());
        self.step_with_scratch(phases, omega, k, dt, &mut coupling)
    }

    /// Pure variant: return the next ensemble, leaving `phases` untouched.
    fn next_phases(&self, phases: &[f64], omega: &[f64], k: f64, dt: f64) -> SyncResult<Vec<f64>> {
        let mut next = phases.to_vec();
        self.step(&mut next, omega, k, dt)?;
        Ok(next)
    }
}

impl<T: PhaseUpdateRule + ?Sized> PhaseUpdateRule for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn pair_coupling(&self, delta: f64) -> f64 {
        (**self).pair_coupling(delta)
    }

    // Forwarded so an overriding implementor keeps its own step.
    fn step_with_scratch(
        &self,
        phases: &mut [f64],
        omega: &[f64],
        k: f64,
        dt: f64,
        coupling: &mut Vec<f64>,
    ) -> SyncResult<()> {
        (**self).step_with_scratch(phases, omega, k, dt, coupling)
    }

    fn step(&self, phases: &mut [f64], omega: &[f64], k: f64, dt: f64) -> SyncResult<()> {
        (**self).step(phases, omega, k, dt)
    }

    fn next_phases(&self, phases: &[f64], omega: &[f64], k: f64, dt: f64) -> SyncResult<Vec<f64>> {
        (**self).next_phases(phases, omega, k, dt)
    }
}

/// The two built-in coupling models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouplingModel {
    Kuramoto,
    Winfree,
}

impl CouplingModel {
    pub const ALL: [CouplingModel; 2] = [CouplingModel::Kuramoto, CouplingModel::Winfree];

    pub fn as_str(&self) -> &'static str {
        match self {
            CouplingModel::Kuramoto => "Kuramoto",
            CouplingModel::Winfree => "Winfree",
        }
    }
}

impl PhaseUpdateRule for CouplingModel {
    fn name(&self) -> &str {
        self.as_str()
    }

    #[inline]
    fn pair_coupling(&self, delta: f64) -> f64 {
        match self {
            CouplingModel::Kuramoto => delta.sin(),
            CouplingModel::Winfree => 1.0 + delta.cos(),
        }
    }
}

impl fmt::Display for CouplingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouplingModel {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kuramoto" => Ok(CouplingModel::Kuramoto),
            "winfree" => Ok(CouplingModel::Winfree),
            other => Err(SyncError::InvalidParameters(format!(
                "unknown model '{other}' (expected kuramoto or winfree)"
            ))),
        }
    }
}

/// One Kuramoto step in place.
pub fn kuramoto_step(phases: &mut [f64], omega: &[f64], k: f64, dt: f64) -> SyncResult<()> {
    CouplingModel::Kuramoto.step(phases, omega, k, dt)
}

/// One Winfree step in place.
pub fn winfree_step(phases: &mut [f64], omega: &[f64], k: f64, dt: f64) -> SyncResult<()> {
    CouplingModel::Winfree.step(phases, omega, k, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread(n: usize) -> Vec<f64> {
        (0..n).map(|i| 0.7 * i as f64 + 0.3).map(wrap_phase).collect()
    }

    #[test]
    fn test_wrap_phase_range() {
        assert_eq!(wrap_phase(0.0), 0.0);
        assert!((wrap_phase(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_phase(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        let tiny = wrap_phase(-1e-18);
        assert!((0.0..TAU).contains(&tiny), "got {tiny}");
    }

    #[test]
    fn test_kuramoto_shape_and_range() {
        let mut phases = spread(10);
        let omega = vec![1.0; 10];
        kuramoto_step(&mut phases, &omega, 1.0, 0.01).unwrap();
        assert_eq!(phases.len(), 10);
        assert!(phases.iter().all(|&th| (0.0..TAU).contains(&th)));
    }

    #[test]
    fn test_winfree_shape_and_range() {
        let mut phases = spread(10);
        let omega = vec![1.0; 10];
        winfree_step(&mut phases, &omega, 1.0, 0.01).unwrap();
        assert_eq!(phases.len(), 10);
        assert!(phases.iter().all(|&th| (0.0..TAU).contains(&th)));
    }

    #[test]
    fn test_zero_coupling_is_free_rotation() {
        let phases = spread(12);
        let omega: Vec<f64> = (0..12).map(|i| 0.8 + 0.05 * i as f64).collect();
        let dt = 0.05;
        for model in CouplingModel::ALL {
            let next = model.next_phases(&phases, &omega, 0.0, dt).unwrap();
            for i in 0..phases.len() {
                let expected = wrap_phase(phases[i] + omega[i] * dt);
                assert!(
                    (next[i] - expected).abs() < 1e-12,
                    "{model}: θ[{i}] = {} expected {expected}",
                    next[i]
                );
            }
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut phases = vec![0.0; 4];
        let omega = vec![1.0; 5];
        let err = kuramoto_step(&mut phases, &omega, 1.0, 0.01).unwrap_err();
        assert!(matches!(
            err,
            SyncError::ShapeMismatch {
                phases: 4,
                frequencies: 5
            }
        ));
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        let mut phases: Vec<f64> = Vec::new();
        assert!(matches!(
            winfree_step(&mut phases, &[], 1.0, 0.01),
            Err(SyncError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_next_phases_leaves_input() {
        let phases = spread(5);
        let before = phases.clone();
        let next = CouplingModel::Kuramoto
            .next_phases(&phases, &[1.0; 5], 2.0, 0.1)
            .unwrap();
        assert_eq!(phases, before);
        assert_ne!(next, before);
    }

    #[test]
    fn test_kuramoto_self_pair_contributes_nothing() {
        // Single oscillator: sin(0) = 0, so only ω drives it.
        let mut phases = vec![1.0];
        kuramoto_step(&mut phases, &[0.5], 3.0, 0.1).unwrap();
        assert!((phases[0] - 1.05).abs() < 1e-12);
    }

    // Winfree self-pairing quirk: 1 + cos(0) = 2 is kept in the sum, so a
    // lone oscillator still feels a coupling drive of 2K. Intentional;
    // pending confirmation against the reference behaviour.
    #[test]
    fn test_winfree_self_pair_quirk_preserved() {
        let mut phases = vec![1.0];
        let (w, k, dt) = (0.5, 3.0, 0.1);
        winfree_step(&mut phases, &[w], k, dt).unwrap();
        let expected = 1.0 + (w + 2.0 * k) * dt;
        assert!((phases[0] - expected).abs() < 1e-12, "θ' = {}", phases[0]);
    }

    #[test]
    fn test_kuramoto_pulls_pair_together() {
        let mut phases = vec![0.0, 1.0];
        let omega = [1.0, 1.0];
        let gap_before = phases[1] - phases[0];
        kuramoto_step(&mut phases, &omega, 2.0, 0.05).unwrap();
        let gap_after = phases[1] - phases[0];
        assert!(gap_after < gap_before, "{gap_before} → {gap_after}");
    }

    #[test]
    fn test_coupling_uses_pre_step_ensemble() {
        // Synchronous update: the step is symmetric under relabelling.
        let omega = [0.9, 1.1, 1.0];
        let a = CouplingModel::Winfree
            .next_phases(&[0.1, 2.0, 4.0], &omega, 1.5, 0.05)
            .unwrap();
        let b = CouplingModel::Winfree
            .next_phases(&[4.0, 2.0, 0.1], &[1.0, 1.1, 0.9], 1.5, 0.05)
            .unwrap();
        assert!((a[0] - b[2]).abs() < 1e-12);
        assert!((a[1] - b[1]).abs() < 1e-12);
        assert!((a[2] - b[0]).abs() < 1e-12);
    }

    #[test]
    fn test_overflowing_step_rejected_without_mutation() {
        let mut phases = vec![0.5, 1.0];
        let err = winfree_step(&mut phases, &[1.0, 1.0], 1e308, 0.5).unwrap_err();
        assert!(matches!(err, SyncError::NonFinitePhase { index: 0 }), "{err}");
        assert_eq!(phases, vec![0.5, 1.0]);
    }

    /// Rule that pins every phase to 1.0 instead of integrating.
    struct Pinned;

    impl PhaseUpdateRule for Pinned {
        fn name(&self) -> &str {
            "Pinned"
        }

        fn pair_coupling(&self, _delta: f64) -> f64 {
            0.0
        }

        fn step_with_scratch(
            &self,
            phases: &mut [f64],
            _omega: &[f64],
            _k: f64,
            _dt: f64,
            _coupling: &mut Vec<f64>,
        ) -> SyncResult<()> {
            phases.iter_mut().for_each(|th| *th = 1.0);
            Ok(())
        }
    }

    fn advance_through<P: PhaseUpdateRule>(rule: P, phases: &mut [f64], omega: &[f64]) {
        let mut scratch = Vec::new();
        rule.step_with_scratch(phases, omega, 1.0, 0.1, &mut scratch).unwrap();
        rule.step(phases, omega, 1.0, 0.1).unwrap();
        assert_eq!(rule.next_phases(phases, omega, 1.0, 0.1).unwrap(), vec![1.0; 4]);
    }

    #[test]
    fn test_reference_keeps_overridden_step() {
        let omega = [2.0; 4];

        let mut phases = spread(4);
        advance_through(&Pinned, &mut phases, &omega);
        assert_eq!(phases, vec![1.0; 4]);

        let dynamic: &dyn PhaseUpdateRule = &Pinned;
        let mut phases = spread(4);
        advance_through(&dynamic, &mut phases, &omega);
        assert_eq!(phases, vec![1.0; 4]);
    }

    #[test]
    fn test_model_parse_and_display() {
        assert_eq!("kuramoto".parse::<CouplingModel>().unwrap(), CouplingModel::Kuramoto);
        assert_eq!(" Winfree ".parse::<CouplingModel>().unwrap(), CouplingModel::Winfree);
        assert!("stuart-landau".parse::<CouplingModel>().is_err());
        assert_eq!(CouplingModel::Winfree.to_string(), "Winfree");
        assert_eq!(CouplingModel::Kuramoto.name(), "Kuramoto");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn ensemble() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
            (1usize..40).prop_flat_map(|n| {
                (
                    prop::collection::vec(0.0..TAU, n),
                    prop::collection::vec(-3.0..3.0f64, n),
                )
            })
        }

        proptest! {
            #[test]
            fn prop_rules_keep_length_and_range(
                (phases, omega) in ensemble(),
                k in -5.0..5.0f64,
                dt in 0.001..0.2f64,
            ) {
                for model in CouplingModel::ALL {
                    let next = model.next_phases(&phases, &omega, k, dt).unwrap();
                    prop_assert_eq!(next.len(), phases.len());
                    prop_assert!(next.iter().all(|&th| (0.0..TAU).contains(&th)));
                }
            }
        }
    }
}
