// ─────────────────────────────────────────────────────────────────────
// Lampyris — Command-Line Harness
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! `lampyris run` drives a comparison and logs its metrics;
//! `lampyris check` runs the engine self-test. Both report success or
//! failure through the process exit status.

mod check;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;

use clap::{Args, Parser, Subcommand};

use lampyris_core::{calculate_metrics, compare_models_seeded, save_results, ModelRanking};
use lampyris_physics::CouplingModel;
use lampyris_types::{SimulationParams, SyncResult};

#[derive(Parser)]
#[command(name = "lampyris")]
#[command(about = "Firefly synchronisation: Kuramoto vs Winfree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a model comparison and log its metrics
    Run(RunArgs),

    /// Run the engine self-test; exit status reports pass/fail
    Check {
        /// Seeds tried for the Kuramoto synchronisation pass rate
        #[arg(long, default_value_t = 20)]
        trials: u64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// JSON parameter file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of oscillators
    #[arg(long)]
    n: Option<usize>,

    /// Coupling strength K
    #[arg(long)]
    k: Option<f64>,

    /// Time step
    #[arg(long)]
    dt: Option<f64>,

    /// Number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Mean natural frequency
    #[arg(long)]
    omega_mean: Option<f64>,

    /// Natural frequency spread
    #[arg(long)]
    omega_std: Option<f64>,

    /// Models to compare, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    models: Vec<String>,

    /// Seed for reproducible runs (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the full result set to this JSON file
    #[arg(long)]
    output: Option<PathBuf>,
}

impl RunArgs {
    fn params(&self) -> SyncResult<SimulationParams> {
        let mut params = match &self.config {
            Some(path) => SimulationParams::from_json(&std::fs::read_to_string(path)?)?,
            None => SimulationParams::default(),
        };
        if let Some(n) = self.n {
            params.n = n;
        }
        if let Some(k) = self.k {
            params.k = k;
        }
        if let Some(dt) = self.dt {
            params.dt = dt;
        }
        if let Some(steps) = self.steps {
            params.steps = steps;
        }
        if let Some(omega_mean) = self.omega_mean {
            params.omega_mean = omega_mean;
        }
        if let Some(omega_std) = self.omega_std {
            params.omega_std = omega_std;
        }
        params.validate()?;
        Ok(params)
    }

    fn models(&self) -> SyncResult<Vec<CouplingModel>> {
        if self.models.is_empty() {
            return Ok(CouplingModel::ALL.to_vec());
        }
        self.models.iter().map(|m| m.parse()).collect()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

fn command_run(args: &RunArgs) -> SyncResult<()> {
    let params = args.params()?;
    let models = args.models()?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!(
        "N={} K={} dt={} steps={} ω̄={} σ_ω={} seed={seed}",
        params.n,
        params.k,
        params.dt,
        params.steps,
        params.omega_mean,
        params.omega_std
    );

    let results = compare_models_seeded(&models, &params, seed)?;

    for (name, record) in results.iter() {
        let metrics = calculate_metrics(record)?;
        let summary: Vec<String> = metrics
            .entries()
            .iter()
            .map(|(key, value)| format!("{key}={value:.4}"))
            .collect();
        log::info!("{name}: {} ({:.1}ms)", summary.join(" "), record.total_time_s * 1000.0);
    }

    if let Some(ranking) = ModelRanking::from_results(&results) {
        log::info!(
            "Best: {} (R={:.3})  Worst: {} (R={:.3})",
            ranking.best,
            ranking.best_r,
            ranking.worst,
            ranking.worst_r
        );
        if results.len() > 1 && !ranking.expected_ordering() {
            log::warn!("Kuramoto did not synchronise best; check the parameters");
        }
    }

    if let Some(path) = &args.output {
        save_results(&results, path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(args) => match command_run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        },
        Commands::Check { trials } => {
            if check::run_self_test(*trials) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
