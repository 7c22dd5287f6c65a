//! Single bivariate Gaussian over velocity.

use std::f64::consts::PI;

use ado_core::{Covariance2, Position2D, Velocity2D};
use nalgebra::{Cholesky, Matrix2, SymmetricEigen, Vector2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::{DistError, DistResult, VelocityDistribution};

/// Absolute tolerance for the symmetry and PSD checks.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A bivariate normal distribution `N(mean, covariance)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Gaussian2D {
    /// Mean velocity.
    pub mean: Velocity2D,
    /// Velocity covariance.
    pub covariance: Covariance2,
}

impl Gaussian2D {
    /// Store `mean` and `covariance` as given.  No validation.
    #[inline]
    pub fn new(mean: Velocity2D, covariance: Covariance2) -> Self {
        Self { mean, covariance }
    }

    /// Like [`new`](Self::new) but rejects covariances that are not
    /// symmetric positive semi-definite.
    pub fn try_new(mean: Velocity2D, covariance: Covariance2) -> DistResult<Self> {
        let gaussian = Self::new(mean, covariance);
        if !gaussian.is_well_formed() {
            return Err(DistError::MalformedCovariance);
        }
        Ok(gaussian)
    }

    /// Isotropic Gaussian with variance `variance` on both axes.
    pub fn isotropic(mean: Velocity2D, variance: f64) -> Self {
        Self::new(mean, Matrix2::identity() * variance)
    }

    /// `true` if the covariance is finite, symmetric and PSD.
    pub fn is_well_formed(&self) -> bool {
        let c = &self.covariance;
        if !c.iter().all(|x| x.is_finite()) || !self.mean.iter().all(|x| x.is_finite()) {
            return false;
        }
        if (c[(0, 1)] - c[(1, 0)]).abs() > SYMMETRY_TOLERANCE {
            return false;
        }
        SymmetricEigen::new(*c)
            .eigenvalues
            .iter()
            .all(|&l| l >= -SYMMETRY_TOLERANCE)
    }

    /// Lower Cholesky factor and determinant, when the covariance is
    /// symmetric positive definite.
    fn factor(&self) -> Option<(Matrix2<f64>, f64)> {
        let c = &self.covariance;
        if (c[(0, 1)] - c[(1, 0)]).abs() > SYMMETRY_TOLERANCE {
            return None;
        }
        let l = Cholesky::new(*c)?.unpack();
        let det = (l[(0, 0)] * l[(1, 1)]).powi(2);
        (det > 0.0 && det.is_finite()).then_some((l, det))
    }

    /// Squared Mahalanobis distance of `velocity` from the mean, or `None`
    /// for a covariance that is not positive definite.
    pub fn mahalanobis_squared(&self, velocity: &Velocity2D) -> Option<f64> {
        let (l, _) = self.factor()?;
        let y = l.solve_lower_triangular(&(velocity - self.mean))?;
        Some(y.norm_squared())
    }
}

impl Default for Gaussian2D {
    /// Zero mean, unit variance, no correlation.
    fn default() -> Self {
        Self::new(Velocity2D::zeros(), Covariance2::identity())
    }
}

impl VelocityDistribution for Gaussian2D {
    #[inline]
    fn mean(&self) -> Velocity2D {
        self.mean
    }

    #[inline]
    fn covariance(&self) -> Covariance2 {
        self.covariance
    }

    fn density(&self, velocity: &Velocity2D) -> f64 {
        let Some((l, det)) = self.factor() else {
            return 0.0;
        };
        let Some(y) = l.solve_lower_triangular(&(velocity - self.mean)) else {
            return 0.0;
        };
        (-0.5 * y.norm_squared()).exp() / (2.0 * PI * det.sqrt())
    }

    fn log_density(&self, velocity: &Velocity2D) -> f64 {
        let Some((l, det)) = self.factor() else {
            return f64::NEG_INFINITY;
        };
        let Some(y) = l.solve_lower_triangular(&(velocity - self.mean)) else {
            return f64::NEG_INFINITY;
        };
        -0.5 * y.norm_squared() - (2.0 * PI).ln() - 0.5 * det.ln()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Velocity2D {
        // Eigen-factor instead of Cholesky so singular PSD covariances
        // (e.g. all-zero) still sample.
        let symmetric = (self.covariance + self.covariance.transpose()) * 0.5;
        let eigen = SymmetricEigen::new(symmetric);
        let scale = eigen.eigenvalues.map(|l| l.max(0.0).sqrt());
        let z = Vector2::<f64>::new(
            StandardNormal.sample(rng),
            StandardNormal.sample(rng),
        );
        self.mean + eigen.eigenvectors * z.component_mul(&scale)
    }

    #[inline]
    fn mode_count(&self) -> usize {
        1
    }

    fn integrate(&self, origin: &Position2D, dt: f64) -> Self {
        Self::new(origin + self.mean * dt, self.covariance * (dt * dt))
    }
}
