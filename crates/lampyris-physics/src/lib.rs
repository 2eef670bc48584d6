// ─────────────────────────────────────────────────────────────────────
// Lampyris — Oscillator Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Mean-field phase-coupling rules (Kuramoto, Winfree) and the
//! order-parameter observables used to measure their synchrony.

pub mod order;
pub mod rules;

pub use order::{mean_phase, order_parameter, unit_circle_points, OrderVector};
pub use rules::{kuramoto_step, winfree_step, wrap_phase, CouplingModel, PhaseUpdateRule};
