// ─────────────────────────────────────────────────────────────────────
// Lampyris — Firefly Synchronisation Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Simulation parameters, trajectory records, derived metrics and the
//! error hierarchy shared by every Lampyris crate.

pub mod config;
pub mod error;
pub mod metrics;
pub mod record;

pub use config::SimulationParams;
pub use error::{SyncError, SyncResult};
pub use metrics::SyncMetrics;
pub use record::{ComparisonResults, ModelRun, TrajectoryRecord};
