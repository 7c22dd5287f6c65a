//! Single-mode model: one Gaussian, fixed at construction.

use ado_core::{Covariance2, Trajectory, Velocity2D};
use ado_dist::Gaussian2D;

use crate::VelocityModel;

/// A time-invariant model with exactly one Gaussian mode.
///
/// `vpdf` ignores the history it is given and always returns
/// `N(mean, covariance)`.  History conditioning belongs to
/// [`MultiMode`][crate::MultiMode] and future learned variants.
///
/// The covariance is stored unchecked; see the `ado-dist` crate docs for
/// what a malformed one does downstream.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleMode {
    pub mean:       Velocity2D,
    pub covariance: Covariance2,
}

impl SingleMode {
    #[inline]
    pub fn new(mean: Velocity2D, covariance: Covariance2) -> Self {
        Self { mean, covariance }
    }
}

impl Default for SingleMode {
    /// The "no information" prior: zero mean, identity covariance.
    fn default() -> Self {
        Self::new(Velocity2D::zeros(), Covariance2::identity())
    }
}

impl VelocityModel for SingleMode {
    type Dist = Gaussian2D;

    fn vpdf(&self, _history: &Trajectory) -> Gaussian2D {
        Gaussian2D::new(self.mean, self.covariance)
    }

    #[inline]
    fn mode_count(&self) -> usize {
        1
    }
}
