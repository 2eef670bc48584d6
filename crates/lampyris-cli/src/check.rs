// ─────────────────────────────────────────────────────────────────────
// Lampyris — Engine Self-Test
// ─────────────────────────────────────────────────────────────────────
//! Behavioural checks run by `lampyris check`. Each check logs its own
//! verdict; the harness passes only if all do.

use lampyris_core::{
    calculate_metrics, compare_models_seeded, export_results, load_results,
    simulate_model_seeded, synchronization_time,
};
use lampyris_physics::{order_parameter, CouplingModel, PhaseUpdateRule};
use lampyris_types::{SimulationParams, SyncResult};

const PASS_RATE: f64 = 0.9;

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

fn check_detector() -> SyncResult<bool> {
    Ok(synchronization_time(&[0.95; 10], 0.9, 5) == 0
        && synchronization_time(&[0.1; 10], 0.9, 5) == 9
        && synchronization_time(&[0.99; 4], 0.9, 5) == 3)
}

fn check_order_parameter() -> SyncResult<bool> {
    let r = order_parameter(&[1.3; 25])?;
    Ok((r - 1.0).abs() < 1e-9)
}

fn check_free_rotation() -> SyncResult<bool> {
    let phases = [0.1, 2.0, 4.5, 6.2];
    let omega = [0.9, 1.0, 1.1, 1.2];
    let dt = 0.05;
    for model in CouplingModel::ALL {
        let next = model.next_phases(&phases, &omega, 0.0, dt)?;
        let ok = next.iter().zip(phases.iter().zip(&omega)).all(|(&th, (&th0, &w))| {
            (th - lampyris_physics::wrap_phase(th0 + w * dt)).abs() < 1e-12
        });
        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_kuramoto_pass_rate(trials: u64) -> SyncResult<bool> {
    let params = firefly_params();
    let mut passed = 0u64;
    for seed in 0..trials {
        if simulate_model_seeded(CouplingModel::Kuramoto, &params, seed)?.final_r > 0.8 {
            passed += 1;
        }
    }
    log::info!("Kuramoto reached R > 0.8 in {passed}/{trials} seeds");
    Ok(trials > 0 && passed as f64 >= PASS_RATE * trials as f64)
}

fn check_comparison() -> SyncResult<bool> {
    let params = firefly_params();
    let results = compare_models_seeded(&CouplingModel::ALL, &params, 1)?;
    let shaped = results.model_names() == ["Kuramoto", "Winfree"]
        && results.iter().all(|(_, r)| r.len() == params.steps);

    let mut passthrough = true;
    for (_, record) in results.iter() {
        let metrics = calculate_metrics(record)?;
        passthrough &= Some(metrics.final_sync.to_bits())
            == record.history_r.last().map(|r| r.to_bits());
    }

    let mut buf = Vec::new();
    export_results(&results, &mut buf)?;
    let round_trip = load_results(buf.as_slice())? == results;

    Ok(shaped && passthrough && round_trip)
}

/// Run every check; true when all pass.
pub fn run_self_test(trials: u64) -> bool {
    let checks: [(&str, SyncResult<bool>); 5] = [
        ("synchronisation-time detector", check_detector()),
        ("order parameter of identical phases", check_order_parameter()),
        ("free rotation at K = 0", check_free_rotation()),
        ("Kuramoto pass rate", check_kuramoto_pass_rate(trials)),
        ("two-model comparison", check_comparison()),
    ];

    let mut all_passed = true;
    for (name, outcome) in checks {
        match outcome {
            Ok(true) => log::info!("PASS {name}"),
            Ok(false) => {
                log::error!("FAIL {name}");
                all_passed = false;
            }
            Err(e) => {
                log::error!("FAIL {name}: {e}");
                all_passed = false;
            }
        }
    }
    all_passed
}
