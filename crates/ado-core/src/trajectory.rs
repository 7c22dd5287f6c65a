//! Time-stamped position history.
//!
//! A `Trajectory` is an append-only log: entries can be pushed at the end
//! but never removed or reordered.  Timestamps are strictly increasing, which
//! `push` enforces before touching the log, so a rejected entry leaves the
//! trajectory exactly as it was.

use crate::kinematics::{finite_difference, Position2D, Velocity2D};
use crate::{CoreError, CoreResult};

/// One observed position and the time (seconds) it was observed at.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimedPosition {
    pub time:     f64,
    pub position: Position2D,
}

impl TimedPosition {
    #[inline]
    pub fn new(time: f64, position: Position2D) -> Self {
        Self { time, position }
    }
}

/// Chronologically ordered positions of one ado.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    entries: Vec<TimedPosition>,
}

impl Trajectory {
    /// An empty trajectory.
    #[inline]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Build from already time-stamped entries, validating their order.
    pub fn from_entries<I>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = TimedPosition>,
    {
        let mut trajectory = Self::new();
        for entry in entries {
            trajectory.push(entry)?;
        }
        Ok(trajectory)
    }

    /// Stamp `positions` at `t = i * dt`.
    ///
    /// # Errors
    ///
    /// `CoreError::Config` if `dt` is not a positive finite number.
    pub fn from_positions<I>(positions: I, dt: f64) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Position2D>,
    {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(CoreError::Config(format!("time step must be positive, got {dt}")));
        }
        let entries = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| TimedPosition::new(i as f64 * dt, p))
            .collect();
        Ok(Self { entries })
    }

    /// Append an entry.  Fails without mutating if `entry.time` is not
    /// strictly after the last entry's time (or is NaN).
    pub fn push(&mut self, entry: TimedPosition) -> CoreResult<()> {
        if let Some(last) = self.entries.last() {
            if !(entry.time > last.time) {
                return Err(CoreError::NonChronological { last: last.time, next: entry.time });
            }
        } else if entry.time.is_nan() {
            return Err(CoreError::NonChronological { last: f64::NEG_INFINITY, next: entry.time });
        }
        self.entries.push(entry);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<&TimedPosition> {
        self.entries.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&TimedPosition> {
        self.entries.last()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, TimedPosition> {
        self.entries.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[TimedPosition] {
        &self.entries
    }

    /// Positions only, oldest first.
    pub fn positions(&self) -> impl Iterator<Item = &Position2D> + '_ {
        self.entries.iter().map(|e| &e.position)
    }

    /// Finite-difference velocities between consecutive entries.
    ///
    /// Yields `len() - 1` values (none for fewer than two entries).
    pub fn velocities(&self) -> impl Iterator<Item = Velocity2D> + '_ {
        self.entries.windows(2).filter_map(|w| {
            finite_difference(&w[0].position, &w[1].position, w[1].time - w[0].time)
        })
    }

    /// Velocity between the last two entries.
    pub fn latest_velocity(&self) -> Option<Velocity2D> {
        match self.entries.as_slice() {
            [.., a, b] => finite_difference(&a.position, &b.position, b.time - a.time),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TimedPosition;
    type IntoIter = std::slice::Iter<'a, TimedPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
