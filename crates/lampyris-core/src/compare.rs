// ─────────────────────────────────────────────────────────────────────
// Lampyris — Multi-Model Comparison Harness
// ─────────────────────────────────────────────────────────────────────
//! Runs one driver per model with shared parameters, strictly in
//! request order. Each run draws its own initial ensemble, so no two
//! models start from identical conditions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use lampyris_physics::{CouplingModel, PhaseUpdateRule};
use lampyris_types::{ComparisonResults, SimulationParams, SyncError, SyncResult, TrajectoryRecord};

use crate::simulation::simulate_model;

/// Reject empty or repeated names and invalid parameters before any run.
fn check_entries(names: &[&str], params: &SimulationParams) -> SyncResult<()> {
    params.validate()?;
    if names.is_empty() {
        return Err(SyncError::InvalidParameters(
            "at least one model must be selected".to_string(),
        ));
    }
    for (i, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(SyncError::InvalidParameters(
                "model name must not be empty".to_string(),
            ));
        }
        if names[..i].contains(name) {
            return Err(SyncError::InvalidParameters(format!(
                "duplicate model name '{name}'"
            )));
        }
    }
    Ok(())
}

fn run_all<F>(names: &[&str], mut run_one: F) -> SyncResult<ComparisonResults>
where
    F: FnMut(usize) -> SyncResult<TrajectoryRecord>,
{
    let mut results = ComparisonResults::new();
    for (i, &name) in names.iter().enumerate() {
        log::info!("Simulating {name}...");
        let record = run_one(i).map_err(|e| e.in_model(name))?;
        results.insert(name, record)?;
    }
    Ok(results)
}

/// Compare named rules. The first failing run aborts the comparison with
/// `ModelRunFailure`; completed runs are discarded.
pub fn compare_rules<S, P, R>(
    rules: &[(S, P)],
    params: &SimulationParams,
    rng: &mut R,
) -> SyncResult<ComparisonResults>
where
    S: AsRef<str>,
    P: PhaseUpdateRule,
    R: Rng + ?Sized,
{
    let names: Vec<&str> = rules.iter().map(|(name, _)| name.as_ref()).collect();
    check_entries(&names, params)?;
    run_all(&names, |i| simulate_model(&rules[i].1, params, &mut *rng))
}

/// Compare built-in models, keyed "Kuramoto" / "Winfree".
pub fn compare_models<R: Rng + ?Sized>(
    models: &[CouplingModel],
    params: &SimulationParams,
    rng: &mut R,
) -> SyncResult<ComparisonResults> {
    let rules: Vec<(&str, CouplingModel)> = models.iter().map(|&m| (m.as_str(), m)).collect();
    compare_rules(&rules, params, rng)
}

/// Compare built-in models, seeding model `i` with `seed + i`.
///
/// Each model's run is reproducible on its own regardless of which other
/// models are selected before it.
pub fn compare_models_seeded(
    models: &[CouplingModel],
    params: &SimulationParams,
    seed: u64,
) -> SyncResult<ComparisonResults> {
    let names: Vec<&str> = models.iter().map(|m| m.as_str()).collect();
    check_entries(&names, params)?;
    run_all(&names, |i| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
        simulate_model(models[i], params, &mut rng)
    })
}

/// Best and worst model of a comparison by final R.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRanking {
    pub best: String,
    pub best_r: f64,
    pub worst: String,
    pub worst_r: f64,
}

impl ModelRanking {
    /// `None` for an empty result set.
    pub fn from_results(results: &ComparisonResults) -> Option<Self> {
        let best = results.best()?;
        let worst = results.worst()?;
        Some(Self {
            best: best.model.clone(),
            best_r: best.record.final_r,
            worst: worst.model.clone(),
            worst_r: worst.record.final_r,
        })
    }

    /// Kuramoto is expected to synchronise best.
    pub fn expected_ordering(&self) -> bool {
        self.best == CouplingModel::Kuramoto.as_str()
    }
}
