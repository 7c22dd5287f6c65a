//! The `Sim` struct and its step loop.

use ado_core::kinematics::clamp_speed;
use ado_core::{AdoId, AdoRng, SimConfig, StepClock, Tick, Velocity2D};
use ado_dist::VelocityDistribution;
use ado_model::{Ado, AnyModel, VelocityModel};
use tracing::{debug, info, warn};

use crate::{SimError, SimObserver, SimResult};

/// The fleet runner.
///
/// `Sim` owns every ado and drives the two-phase step loop:
///
/// 1. **Query phase** (optionally parallel with the `parallel` feature):
///    each ado draws a velocity from its own `vpdf_current()` using its own
///    [`AdoRng`].  Nothing is written.
/// 2. **Apply phase** (sequential, ascending `AdoId`): velocities above
///    `speed_max` are scaled down to it, then each ado advances by `dt`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (step length, total steps, seed, …).
    pub config: SimConfig,

    /// Step clock: tracks the current step and maps it to seconds.
    pub clock: StepClock,

    /// The fleet, indexed by `AdoId`.
    pub ados: Vec<Ado<AnyModel>>,

    /// Per-ado deterministic RNGs, kept apart from `ados` for the split
    /// borrow in the query phase.
    pub rngs: Vec<AdoRng>,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current step to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let start = self.clock.current_tick;
        while self.clock.current_tick < self.config.end_tick() {
            self.step_observed(observer)?;
        }
        info!(
            steps = self.clock.current_tick - start,
            ados = self.ados.len(),
            "simulation finished at {}",
            self.clock
        );
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_tick`).
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_observed(observer)?;
        }
        Ok(())
    }

    /// One query + apply step without observer callbacks.
    ///
    /// Returns how many ados were speed-clamped.  On error the ados before
    /// the failing one have already moved; the failing ado, every ado after
    /// it and the clock are unchanged.
    pub fn step(&mut self) -> SimResult<usize> {
        let now = self.clock.current_tick;
        let velocities = self.query_velocities();
        let clamped = self.apply_velocities(now, velocities)?;
        self.clock.advance();
        Ok(clamped)
    }

    #[inline]
    pub fn ado(&self, id: AdoId) -> Option<&Ado<AnyModel>> {
        self.ados.get(id.index())
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_step_start(now);
        let clamped = self.step()?;
        observer.on_step_end(now, clamped);
        let interval = self.config.snapshot_interval_steps;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.ados);
        }
        Ok(())
    }

    /// Sample one velocity per ado.  Read-only with respect to the fleet.
    fn query_velocities(&mut self) -> Vec<Velocity2D> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ados = self.ados.as_slice();
        let rngs = &mut self.rngs;

        #[cfg(not(feature = "parallel"))]
        {
            ados.iter()
                .zip(rngs.iter_mut())
                .map(|(ado, rng)| sample_velocity(ado, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut query = || -> Vec<Velocity2D> {
                ados.par_iter()
                    .zip(rngs.par_iter_mut())
                    .map(|(ado, rng)| sample_velocity(ado, rng))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(query),
                None       => query(),
            }
        }
    }

    /// Apply sampled velocities in ascending `AdoId` order.
    fn apply_velocities(&mut self, now: Tick, velocities: Vec<Velocity2D>) -> SimResult<usize> {
        let dt = self.config.dt_secs;
        let speed_max = self.config.speed_max;
        let mut clamped = 0;

        for (ado, sampled) in self.ados.iter_mut().zip(velocities) {
            let (velocity, was_clamped) = clamp_speed(sampled, speed_max);
            if was_clamped {
                clamped += 1;
                warn!(
                    ado = %ado.id(),
                    step = %now,
                    speed = sampled.norm(),
                    speed_max,
                    "sampled velocity exceeds speed limit, clamping"
                );
            }
            ado.advance(&velocity, dt)
                .map_err(|source| SimError::Model { ado: ado.id(), source })?;
        }

        debug!(step = %now, ados = self.ados.len(), clamped, "step applied");
        Ok(clamped)
    }
}

fn sample_velocity(ado: &Ado<AnyModel>, rng: &mut AdoRng) -> Velocity2D {
    ado.model().vpdf(ado.history()).sample(rng.inner())
}
