// ─────────────────────────────────────────────────────────────────────
// Lampyris — Simulation Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Time-stepping driver, multi-model comparison harness and
//! synchronisation metrics for firefly-style oscillator ensembles.
//!
//! # Invariants
//!
//! 1. **Runs are independent**: every driver run owns its phase and
//!    frequency ensembles and draws its own initial conditions from the
//!    generator it is handed. No process-wide random state exists.
//!
//! 2. **Records are exact**: each recorded phase vector is a copy taken
//!    after the step, and `final_r` is the last recorded R, not a
//!    recomputation.
//!
//! 3. **Fail fast**: any error inside a run aborts it with no partial
//!    record; any failed model aborts the whole comparison.
//!
//! 4. **Sequential**: models run one after another in request order.

pub mod archive;
pub mod compare;
pub mod detector;
pub mod metrics;
pub mod simulation;

pub use archive::{export_results, load_results, open_results, save_results};
pub use compare::{compare_models, compare_models_seeded, compare_rules, ModelRanking};
pub use detector::{
    first_sustained_crossing, synchronization_time, DEFAULT_SYNC_THRESHOLD, DEFAULT_SYNC_WINDOW,
};
pub use metrics::{calculate_metrics, CROSSING_THRESHOLDS, STABILITY_WINDOW};
pub use simulation::{simulate_model, simulate_model_seeded, Simulation, SimulationState};
