//! 2D kinematic aliases and small helpers.
//!
//! Positions and velocities are plain `nalgebra` column vectors so the
//! distribution code can do linear algebra on them without conversion.

use nalgebra::{Matrix2, Vector2};

/// A point `(x, y)` in world coordinates, metres.
pub type Position2D = Vector2<f64>;

/// A velocity `(vx, vy)`, metres per second.
pub type Velocity2D = Vector2<f64>;

/// A 2×2 velocity covariance.  Callers must keep it symmetric PSD.
pub type Covariance2 = Matrix2<f64>;

/// Velocity that moves from `from` to `to` in `dt` seconds.
///
/// Returns `None` for a non-positive or non-finite `dt`.
#[inline]
pub fn finite_difference(from: &Position2D, to: &Position2D, dt: f64) -> Option<Velocity2D> {
    if !(dt.is_finite() && dt > 0.0) {
        return None;
    }
    Some((to - from) / dt)
}

/// Scale `velocity` down so its norm does not exceed `speed_max`.
///
/// Returns the (possibly unchanged) velocity and whether clamping happened.
/// A non-finite speed is mapped to zero velocity.
pub fn clamp_speed(velocity: Velocity2D, speed_max: f64) -> (Velocity2D, bool) {
    let speed = velocity.norm();
    if !speed.is_finite() {
        return (Velocity2D::zeros(), true);
    }
    if speed <= speed_max {
        return (velocity, false);
    }
    (velocity * (speed_max / speed), true)
}
