// ─────────────────────────────────────────────────────────────────────
// Lampyris — End-to-End Engine Tests
// ─────────────────────────────────────────────────────────────────────

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lampyris_core::{
    calculate_metrics, compare_models, compare_models_seeded, simulate_model_seeded,
    synchronization_time, ModelRanking,
};
use lampyris_physics::CouplingModel;
use lampyris_types::SimulationParams;

fn firefly_params() -> SimulationParams {
    SimulationParams {
        n: 50,
        k: 2.0,
        dt: 0.05,
        steps: 500,
        omega_mean: 1.0,
        omega_std: 0.1,
    }
}

#[test]
fn test_kuramoto_synchronises_over_seeds() {
    let params = firefly_params();
    let trials = 20;
    let passed = (0..trials)
        .filter(|&seed| {
            let record = simulate_model_seeded(CouplingModel::Kuramoto, &params, seed).unwrap();
            record.final_r > 0.8
        })
        .count();
    assert!(
        passed * 10 >= trials as usize * 9,
        "only {passed}/{trials} seeded runs reached R > 0.8"
    );
}

#[test]
fn test_two_model_comparison_shape() {
    let params = firefly_params();
    let mut rng = ChaCha8Rng::seed_from_u64(2026);
    let results = compare_models(&CouplingModel::ALL, &params, &mut rng).unwrap();
    assert_eq!(results.len(), 2);
    for name in ["Kuramoto", "Winfree"] {
        let record = results.get(name).unwrap();
        assert_eq!(record.history_r.len(), params.steps);
        assert_eq!(record.history_phases.len(), params.steps);
        assert_eq!(record.history_time.len(), params.steps);
    }
}

#[test]
fn test_metrics_pass_final_value_through() {
    let results = compare_models_seeded(&CouplingModel::ALL, &firefly_params(), 5).unwrap();
    for (name, record) in results.iter() {
        let metrics = calculate_metrics(record).unwrap();
        let last = *record.history_r.last().unwrap();
        assert_eq!(metrics.final_sync.to_bits(), last.to_bits(), "{name}");
        assert!(metrics.max_sync >= metrics.final_sync);
        assert!((0.0..=1.0).contains(&metrics.avg_sync));
        assert!(metrics.sync_stability >= 0.0);
        assert!(metrics.time_to_50 <= record.simulated_time() + 1e-12);
    }
}

#[test]
fn test_kuramoto_metrics_show_fast_lock() {
    let record = simulate_model_seeded(CouplingModel::Kuramoto, &firefly_params(), 1).unwrap();
    let metrics = calculate_metrics(&record).unwrap();
    // Crossing times are ordered by threshold.
    assert!(metrics.time_to_50 <= metrics.time_to_80);
    assert!(metrics.time_to_80 <= metrics.time_to_90);
    let idx = synchronization_time(&record.history_r, 0.9, 5);
    assert_eq!(metrics.time_to_90, idx as f64 * record.parameters.dt);
}

#[test]
fn test_ranking_over_comparison() {
    let results = compare_models_seeded(&CouplingModel::ALL, &firefly_params(), 77).unwrap();
    let ranking = ModelRanking::from_results(&results).unwrap();
    assert!(ranking.best_r >= ranking.worst_r);
    assert_ne!(ranking.best, ranking.worst);
}
