// ─────────────────────────────────────────────────────────────────────
// Lampyris — Synchronisation-Time Detector
// ─────────────────────────────────────────────────────────────────────

/// Default R level counted as synchronised.
pub const DEFAULT_SYNC_THRESHOLD: f64 = 0.9;

/// Default number of consecutive steps R must hold the threshold.
pub const DEFAULT_SYNC_WINDOW: usize = 5;

/// First index `i` with `history_r[i..i + window]` entirely ≥ `threshold`.
///
/// The window must lie fully inside the history. A zero window is
/// treated as one step.
///
/// Every fully contained window is scanned, including the last one at
/// `len - window`. A scan over `0..len - window` would stop one short and
/// report a crossing first sustained there as the never-synchronised
/// sentinel instead.
pub fn first_sustained_crossing(history_r: &[f64], threshold: f64, window: usize) -> Option<usize> {
    let window = window.max(1);
    history_r
        .windows(window)
        .position(|w| w.iter().all(|&r| r >= threshold))
}

/// Step index at which synchrony is first sustained.
///
/// Returns `history_r.len() - 1` when it never is (0 for an empty
/// history), so `index × dt` stays a valid time inside the run.
pub fn synchronization_time(history_r: &[f64], threshold: f64, window: usize) -> usize {
    first_sustained_crossing(history_r, threshold, window)
        .unwrap_or_else(|| history_r.len().saturating_sub(1))
}
