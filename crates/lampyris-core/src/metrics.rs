// ─────────────────────────────────────────────────────────────────────
// Lampyris — Metrics Aggregator
// ─────────────────────────────────────────────────────────────────────

use lampyris_types::{SyncError, SyncMetrics, SyncResult, TrajectoryRecord};

use crate::detector::{first_sustained_crossing, synchronization_time, DEFAULT_SYNC_WINDOW};

/// Trailing steps used for the stability measure.
pub const STABILITY_WINDOW: usize = 50;

/// R levels reported as `time_to_50`, `time_to_80`, `time_to_90`.
pub const CROSSING_THRESHOLDS: [f64; 3] = [0.5, 0.8, 0.9];

/// Derive summary statistics from one trajectory.
///
/// Pure and deterministic; nothing is cached between calls.
pub fn calculate_metrics(record: &TrajectoryRecord) -> SyncResult<SyncMetrics> {
    let history = record.history_r.as_slice();
    let final_sync = *history.last().ok_or(SyncError::EmptyTrajectory)?;

    let max_sync = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_sync = mean(history);

    let tail = &history[history.len().saturating_sub(STABILITY_WINDOW)..];
    let sync_stability = population_std(tail);

    let dt = record.parameters.dt;
    let [time_to_50, time_to_80, time_to_90] = CROSSING_THRESHOLDS.map(|threshold| {
        if first_sustained_crossing(history, threshold, DEFAULT_SYNC_WINDOW).is_none() {
            log::debug!("R ≥ {threshold} never sustained; reporting end of run");
        }
        synchronization_time(history, threshold, DEFAULT_SYNC_WINDOW) as f64 * dt
    });

    Ok(SyncMetrics {
        final_sync,
        max_sync,
        avg_sync,
        sync_stability,
        time_to_50,
        time_to_80,
        time_to_90,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with divisor N (not N − 1).
fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
