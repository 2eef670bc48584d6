// ─────────────────────────────────────────────────────────────────────
// Lampyris — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all engine failures.
///
/// The engine never catches or downgrades these; callers decide how to
/// surface them.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A simulation parameter or model selection is out of range.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Phase and frequency ensembles differ in length (or are empty).
    #[error("shape mismatch: {phases} phases vs {frequencies} frequencies")]
    ShapeMismatch { phases: usize, frequencies: usize },

    /// A step drove a phase to ±∞ or NaN (|K|·dt too large).
    #[error("non-finite phase at oscillator {index}: step overflowed")]
    NonFinitePhase { index: usize },

    /// Order parameter or mean phase requested on a zero-length ensemble.
    #[error("empty ensemble: order parameter undefined for zero oscillators")]
    EmptyEnsemble,

    /// Metrics requested on a trajectory with no recorded steps.
    #[error("empty trajectory: no order-parameter history recorded")]
    EmptyTrajectory,

    /// One model of a comparison failed; the comparison is aborted.
    #[error("model '{model}' failed: {source}")]
    ModelRunFailure {
        model: String,
        #[source]
        source: Box<SyncError>,
    },

    /// Parameter file could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Result archive could not be encoded or decoded.
    #[error("archive error: {0}")]
    Archive(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Attach a model name to a run failure.
    pub fn in_model(self, model: impl Into<String>) -> Self {
        SyncError::ModelRunFailure {
            model: model.into(),
            source: Box::new(self),
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
