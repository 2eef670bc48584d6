// ─────────────────────────────────────────────────────────────────────
// Lampyris — Single-Model Simulation Driver
// ─────────────────────────────────────────────────────────────────────
//! Fixed-step Euler driver:
//!
//!   Initialized ──step()──▶ Stepping ──(steps taken)──▶ Completed
//!
//! Phases start uniform on [0, 2π), natural frequencies are drawn from
//! N(ω̄, σ_ω). The working ensemble is owned by the driver and updated in
//! place; every recorded snapshot is a copy.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};

use lampyris_physics::{order_parameter, PhaseUpdateRule};
use lampyris_types::{SimulationParams, SyncError, SyncResult, TrajectoryRecord};

/// Lifecycle of one driver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Ensembles drawn, no step taken yet.
    Initialized,
    /// At least one step taken, more remain.
    Stepping,
    /// All `steps` taken; the record can be collected.
    Completed,
}

/// One run of a phase update rule over a fresh ensemble.
pub struct Simulation<P: PhaseUpdateRule> {
    rule: P,
    params: SimulationParams,
    phases: Vec<f64>,
    omega: Vec<f64>,
    history_r: Vec<f64>,
    history_phases: Vec<Vec<f64>>,
    history_time: Vec<f64>,
    elapsed: Duration,
    // Pre-allocated coupling scratch
    coupling: Vec<f64>,
}

impl<P: PhaseUpdateRule> Simulation<P> {
    /// Validate `params` and draw the initial ensemble from `rng`.
    ///
    /// Phases are drawn before frequencies.
    pub fn initialize<R: Rng + ?Sized>(
        rule: P,
        params: &SimulationParams,
        rng: &mut R,
    ) -> SyncResult<Self> {
        params.validate()?;
        let n = params.n;

        let phase_dist = Uniform::new(0.0, TAU);
        let freq_dist = Normal::new(params.omega_mean, params.omega_std)
            .map_err(|e| SyncError::InvalidParameters(format!("frequency distribution: {e}")))?;

        let phases: Vec<f64> = (0..n).map(|_| phase_dist.sample(rng)).collect();
        let omega: Vec<f64> = (0..n).map(|_| freq_dist.sample(rng)).collect();

        Self::from_ensemble(rule, params, phases, omega)
    }

    /// Start from a caller-supplied ensemble instead of random draws.
    ///
    /// Phases are wrapped into [0, 2π); both vectors must hold `params.n`
    /// entries.
    pub fn from_ensemble(
        rule: P,
        params: &SimulationParams,
        phases: Vec<f64>,
        omega: Vec<f64>,
    ) -> SyncResult<Self> {
        params.validate()?;
        if phases.len() != params.n || omega.len() != params.n {
            return Err(SyncError::ShapeMismatch {
                phases: phases.len(),
                frequencies: omega.len(),
            });
        }
        let steps = params.steps;
        Ok(Self {
            rule,
            params: *params,
            phases: phases.into_iter().map(lampyris_physics::wrap_phase).collect(),
            omega,
            history_r: Vec::with_capacity(steps),
            history_phases: Vec::with_capacity(steps),
            history_time: Vec::with_capacity(steps),
            elapsed: Duration::ZERO,
            coupling: Vec::with_capacity(params.n),
        })
    }

    pub fn state(&self) -> SimulationState {
        match self.history_r.len() {
            0 => SimulationState::Initialized,
            t if t < self.params.steps => SimulationState::Stepping,
            _ => SimulationState::Completed,
        }
    }

    pub fn steps_taken(&self) -> usize {
        self.history_r.len()
    }

    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.omega
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Advance one step and record it. Returns the post-step R.
    pub fn step(&mut self) -> SyncResult<f64> {
        let t = self.history_r.len();
        if t >= self.params.steps {
            return Err(SyncError::InvalidParameters(format!(
                "run already completed all {} steps",
                self.params.steps
            )));
        }

        let start = Instant::now();
        self.rule.step_with_scratch(
            &mut self.phases,
            &self.omega,
            self.params.k,
            self.params.dt,
            &mut self.coupling,
        )?;
        let r = order_parameter(&self.phases)?;

        self.history_r.push(r);
        self.history_phases.push(self.phases.clone());
        self.history_time.push(t as f64 * self.params.dt);
        self.elapsed += start.elapsed();
        Ok(r)
    }

    /// Take every remaining step and return the record.
    pub fn run(mut self) -> SyncResult<TrajectoryRecord> {
        while self.state() != SimulationState::Completed {
            self.step()?;
        }
        self.finish()
    }

    /// Collect the record of a completed run.
    pub fn finish(self) -> SyncResult<TrajectoryRecord> {
        let final_r = match (self.state(), self.history_r.last()) {
            (SimulationState::Completed, Some(&r)) => r,
            _ => {
                return Err(SyncError::InvalidParameters(format!(
                    "run stopped after {} of {} steps",
                    self.history_r.len(),
                    self.params.steps
                )))
            }
        };

        log::debug!(
            "{}: {} steps, R_final={final_r:.4}, {:.3}ms",
            self.rule.name(),
            self.params.steps,
            self.elapsed.as_secs_f64() * 1000.0
        );

        Ok(TrajectoryRecord {
            parameters: self.params,
            frequencies: self.omega,
            history_r: self.history_r,
            history_phases: self.history_phases,
            history_time: self.history_time,
            final_phases: self.phases,
            final_r,
            total_time_s: self.elapsed.as_secs_f64(),
        })
    }
}

/// Run `rule` for `params.steps` steps from a fresh random ensemble.
pub fn simulate_model<P, R>(rule: P, params: &SimulationParams, rng: &mut R) -> SyncResult<TrajectoryRecord>
where
    P: PhaseUpdateRule,
    R: Rng + ?Sized,
{
    Simulation::initialize(rule, params, rng)?.run()
}

/// `simulate_model` with a fresh ChaCha generator seeded from `seed`.
pub fn simulate_model_seeded<P: PhaseUpdateRule>(
    rule: P,
    params: &SimulationParams,
    seed: u64,
) -> SyncResult<TrajectoryRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate_model(rule, params, &mut rng)
}
