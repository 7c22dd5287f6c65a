//! Per-ado kinematic state.

use ado_core::{Position2D, TimedPosition, Trajectory, Velocity2D};

use crate::{ModelError, ModelResult};

/// Current position plus the history that led there.
///
/// The two fields only change together.  Every mutator validates its input
/// before writing anything, so a failed call leaves the state exactly as it
/// was and no caller can observe a half-applied step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdoState {
    position: Position2D,
    time:     f64,
    history:  Trajectory,
}

impl AdoState {
    /// State at `position`, time 0, with an empty history.
    pub fn new(position: Position2D) -> Self {
        Self { position, time: 0.0, history: Trajectory::new() }
    }

    /// State at `position` with `history` stored as-is.  The current time is
    /// the last history timestamp (0 for an empty history).
    pub fn with_history(position: Position2D, history: Trajectory) -> Self {
        let time = history.last().map_or(0.0, |e| e.time);
        Self { position, time, history }
    }

    #[inline]
    pub fn position(&self) -> &Position2D {
        &self.position
    }

    /// Time of the current position, seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn history(&self) -> &Trajectory {
        &self.history
    }

    /// Move with `velocity` for `dt` seconds (single integrator).
    ///
    /// The new position is appended to the history and becomes current.  An
    /// empty history first receives the starting position, so after one step
    /// the history already determines the velocity that was applied.
    pub fn advance(&mut self, velocity: &Velocity2D, dt: f64) -> ModelResult<TimedPosition> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ModelError::InvalidStep(dt));
        }
        if !velocity.iter().all(|x| x.is_finite()) {
            return Err(ModelError::NonFiniteVelocity { vx: velocity.x, vy: velocity.y });
        }
        let next = TimedPosition::new(self.time + dt, self.position + velocity * dt);
        if !(next.time > self.time) {
            // dt vanished against a large current time.
            return Err(ModelError::InvalidStep(dt));
        }
        if let Some(last) = self.history.last() {
            if !(next.time > last.time) {
                return Err(ado_core::CoreError::NonChronological { last: last.time, next: next.time }.into());
            }
        } else {
            self.history.push(TimedPosition::new(self.time, self.position))?;
        }
        self.history.push(next)?;
        self.position = next.position;
        self.time = next.time;
        Ok(next)
    }

    /// Record an externally observed `position` at `time`.
    pub fn observe(&mut self, position: Position2D, time: f64) -> ModelResult<()> {
        self.history.push(TimedPosition::new(time, position))?;
        self.position = position;
        self.time = time;
        Ok(())
    }

    /// Replace position and history together.
    pub fn reset(&mut self, position: Position2D, history: Trajectory) {
        *self = Self::with_history(position, history);
    }

    /// Consume the state, keeping only its history.
    pub fn into_history(self) -> Trajectory {
        self.history
    }
}
