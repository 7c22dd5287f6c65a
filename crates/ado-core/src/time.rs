//! Discrete simulation time.
//!
//! # Design
//!
//! Ados advance and are queried at discrete steps.  The canonical time unit
//! is an integer `Tick`; the mapping to seconds lives in `StepClock`:
//!
//!   time_secs = tick * dt_secs
//!
//! Keeping the step counter integral means repeated stepping never drifts,
//! while trajectories still carry `f64` seconds for finite differences.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Converts between step counts and elapsed seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// Seconds represented by one step.
    pub dt_secs: f64,
    /// The current step, advanced by `StepClock::advance()`.
    pub current_tick: Tick,
}

impl StepClock {
    pub fn new(dt_secs: f64) -> Self {
        Self { dt_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Elapsed seconds since tick 0.
    #[inline]
    pub fn time_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.dt_secs
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.time_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON scene file by the application and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per step.  Default: 0.4.
    pub dt_secs: f64,

    /// Total steps to simulate.
    pub total_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Upper bound on any sampled ado speed, m/s.  Default: 3.0.
    pub speed_max: f64,

    /// Worker thread count for the parallel query phase.  `None` uses all
    /// logical cores.
    pub num_threads: Option<usize>,

    /// Report a snapshot every N steps.  0 disables snapshots.
    pub snapshot_interval_steps: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs:                 0.4,
            total_steps:             20,
            seed:                    0,
            speed_max:               3.0,
            num_threads:             None,
            snapshot_interval_steps: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_steps)
    }

    /// Construct a `StepClock` for this run.
    pub fn make_clock(&self) -> StepClock {
        StepClock::new(self.dt_secs)
    }

    /// Reject values that would make stepping ill-defined.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.dt_secs.is_finite() && self.dt_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "dt_secs must be positive and finite, got {}",
                self.dt_secs
            )));
        }
        if !(self.speed_max.is_finite() && self.speed_max >= 0.0) {
            return Err(CoreError::Config(format!(
                "speed_max must be non-negative and finite, got {}",
                self.speed_max
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
