// ─────────────────────────────────────────────────────────────────────
// Lampyris — Derived Synchronisation Metrics
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Summary statistics of one trajectory.
///
/// Recomputed on demand from a `TrajectoryRecord`; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncMetrics {
    /// Last recorded R, passed through untouched.
    pub final_sync: f64,
    /// Largest R over the run.
    pub max_sync: f64,
    /// Mean R over the run.
    pub avg_sync: f64,
    /// Population standard deviation of R over the last 50 steps.
    pub sync_stability: f64,
    /// Simulated time until R ≥ 0.5 is sustained.
    pub time_to_50: f64,
    /// Simulated time until R ≥ 0.8 is sustained.
    pub time_to_80: f64,
    /// Simulated time until R ≥ 0.9 is sustained.
    pub time_to_90: f64,
}

impl SyncMetrics {
    /// Named scalar view, in display order.
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("final_sync", self.final_sync),
            ("max_sync", self.max_sync),
            ("avg_sync", self.avg_sync),
            ("sync_stability", self.sync_stability),
            ("time_to_50", self.time_to_50),
            ("time_to_80", self.time_to_80),
            ("time_to_90", self.time_to_90),
        ]
    }

    /// Look up one metric by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .iter()
            .find(|(key, _)| *key == name)
            .map(|&(_, value)| value)
    }

    /// Crossing time for a threshold percentage (50, 80 or 90).
    pub fn time_to(&self, percent: u32) -> Option<f64> {
        match percent {
            50 => Some(self.time_to_50),
            80 => Some(self.time_to_80),
            90 => Some(self.time_to_90),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyncMetrics {
        SyncMetrics {
            final_sync: 0.97,
            max_sync: 0.98,
            avg_sync: 0.8,
            sync_stability: 0.01,
            time_to_50: 1.0,
            time_to_80: 2.5,
            time_to_90: 4.0,
        }
    }

    #[test]
    fn test_entries_order() {
        let names: Vec<&str> = sample().entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(names[0], "final_sync");
        assert_eq!(names[6], "time_to_90");
    }

    #[test]
    fn test_get_by_name() {
        assert_eq!(sample().get("avg_sync"), Some(0.8));
        assert_eq!(sample().get("nope"), None);
    }

    #[test]
    fn test_time_to() {
        assert_eq!(sample().time_to(80), Some(2.5));
        assert_eq!(sample().time_to(70), None);
    }
}
