//! The boundary interface every velocity distribution satisfies.

use std::fmt::Debug;

use ado_core::{Covariance2, Position2D, Velocity2D};
use rand::Rng;

/// A probability distribution over an ado's next-step velocity.
///
/// Implementations are plain values: cloning copies all parameters and no
/// method mutates the distribution, so a result can be shared freely across
/// threads.
pub trait VelocityDistribution: Clone + Debug + Send + Sync {
    /// Expected velocity.
    fn mean(&self) -> Velocity2D;

    /// Total covariance of the velocity.
    fn covariance(&self) -> Covariance2;

    /// Probability density at `velocity`.
    fn density(&self, velocity: &Velocity2D) -> f64;

    /// Natural log of [`density`](Self::density).
    fn log_density(&self, velocity: &Velocity2D) -> f64 {
        self.density(velocity).ln()
    }

    /// Draw one velocity.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Velocity2D;

    /// Number of Gaussian components.
    fn mode_count(&self) -> usize;

    /// Push the distribution through one single-integrator step
    /// `p' = origin + v * dt`, giving the distribution of the next position.
    fn integrate(&self, origin: &Position2D, dt: f64) -> Self;
}
