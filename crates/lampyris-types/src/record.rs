// ─────────────────────────────────────────────────────────────────────
// Lampyris — Trajectory Records and Comparison Results
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::config::SimulationParams;
use crate::error::{SyncError, SyncResult};

/// Full history of one simulation run. Immutable once returned by the
/// driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Parameters the run was executed with.
    pub parameters: SimulationParams,
    /// Natural frequencies ω_i drawn at initialisation.
    pub frequencies: Vec<f64>,
    /// Order parameter R after each step (length = steps).
    pub history_r: Vec<f64>,
    /// Snapshot of every phase after each step.
    pub history_phases: Vec<Vec<f64>>,
    /// Simulated time t·dt of each recorded step.
    pub history_time: Vec<f64>,
    /// Phases after the last step.
    pub final_phases: Vec<f64>,
    /// Order parameter after the last step.
    pub final_r: f64,
    /// Wall-clock duration of the stepping loop, in seconds.
    pub total_time_s: f64,
}

impl TrajectoryRecord {
    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.history_r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history_r.is_empty()
    }

    /// Simulated time of the last recorded step (0 for an empty record).
    pub fn simulated_time(&self) -> f64 {
        self.history_time.last().copied().unwrap_or(0.0)
    }

    /// Check that every history array agrees with the recorded parameters.
    ///
    /// Driver output always passes; this guards records that arrive from
    /// outside the engine (e.g. a loaded archive).
    pub fn validate(&self) -> SyncResult<()> {
        self.parameters.validate()?;
        let p = &self.parameters;
        let steps = p.steps;
        if self.history_r.len() != steps
            || self.history_phases.len() != steps
            || self.history_time.len() != steps
        {
            return Err(SyncError::InvalidParameters(format!(
                "history lengths ({}, {}, {}) disagree with steps = {steps}",
                self.history_r.len(),
                self.history_phases.len(),
                self.history_time.len()
            )));
        }
        if self.frequencies.len() != p.n {
            return Err(SyncError::ShapeMismatch {
                phases: p.n,
                frequencies: self.frequencies.len(),
            });
        }
        if self.final_phases.len() != p.n
            || self.history_phases.iter().any(|snap| snap.len() != p.n)
        {
            return Err(SyncError::InvalidParameters(format!(
                "phase snapshots must all hold n = {} oscillators",
                p.n
            )));
        }
        Ok(())
    }
}

/// One entry of a comparison: a model name and its trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRun {
    pub model: String,
    pub record: TrajectoryRecord,
}

/// Model name → trajectory, in the order the models were requested.
///
/// Names are unique within one result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResults {
    runs: Vec<ModelRun>,
}

impl ComparisonResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run. Rejects a name already present.
    pub fn insert(&mut self, model: impl Into<String>, record: TrajectoryRecord) -> SyncResult<()> {
        let model = model.into();
        if self.contains(&model) {
            return Err(SyncError::InvalidParameters(format!(
                "duplicate model name '{model}'"
            )));
        }
        self.runs.push(ModelRun { model, record });
        Ok(())
    }

    pub fn get(&self, model: &str) -> Option<&TrajectoryRecord> {
        self.runs
            .iter()
            .find(|run| run.model == model)
            .map(|run| &run.record)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.runs.iter().any(|run| run.model == model)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrajectoryRecord)> {
        self.runs.iter().map(|run| (run.model.as_str(), &run.record))
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.runs.iter().map(|run| run.model.as_str()).collect()
    }

    pub fn runs(&self) -> &[ModelRun] {
        &self.runs
    }

    /// Model with the highest final R. Earliest entry wins ties.
    pub fn best(&self) -> Option<&ModelRun> {
        self.runs.iter().fold(None, |best: Option<&ModelRun>, run| match best {
            Some(b) if b.record.final_r >= run.record.final_r => Some(b),
            _ => Some(run),
        })
    }

    /// Model with the lowest final R. Earliest entry wins ties.
    pub fn worst(&self) -> Option<&ModelRun> {
        self.runs.iter().fold(None, |worst: Option<&ModelRun>, run| match worst {
            Some(w) if w.record.final_r <= run.record.final_r => Some(w),
            _ => Some(run),
        })
    }

    /// Validate every record and the uniqueness of names.
    pub fn validate(&self) -> SyncResult<()> {
        for (i, run) in self.runs.iter().enumerate() {
            if run.model.is_empty() {
                return Err(SyncError::InvalidParameters(
                    "model name must not be empty".to_string(),
                ));
            }
            if self.runs[..i].iter().any(|r| r.model == run.model) {
                return Err(SyncError::InvalidParameters(format!(
                    "duplicate model name '{}'",
                    run.model
                )));
            }
            run.record
                .validate()
                .map_err(|e| e.in_model(run.model.clone()))?;
        }
        Ok(())
    }
}
