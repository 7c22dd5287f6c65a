//! Unit tests for ado-dist.

use ado_core::{Covariance2, Velocity2D};
use nalgebra::Matrix2;

use crate::{Gaussian2D, Mode};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn diag(a: f64, b: f64) -> Covariance2 {
    Matrix2::new(a, 0.0, 0.0, b)
}

fn mode(mx: f64, my: f64, weight: f64) -> Mode {
    Mode::new(Velocity2D::new(mx, my), Covariance2::identity(), weight)
}

/// Midpoint-rule integral of `f` over the square `[-r, r]²`.
fn integrate_square(f: impl Fn(&Velocity2D) -> f64, r: f64, n: usize) -> f64 {
    let h = 2.0 * r / n as f64;
    let mut total = 0.0;
    for i in 0..n {
        for j in 0..n {
            let v = Velocity2D::new(-r + (i as f64 + 0.5) * h, -r + (j as f64 + 0.5) * h);
            total += f(&v);
        }
    }
    total * h * h
}

// ── Gaussian2D ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gaussian {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::{DistError, VelocityDistribution};

    #[test]
    fn default_is_standard_normal() {
        let g = Gaussian2D::default();
        assert_eq!(g.mean(), Velocity2D::zeros());
        assert_eq!(g.covariance(), Covariance2::identity());
        assert_eq!(g.mode_count(), 1);
    }

    #[test]
    fn density_at_mean() {
        let g = Gaussian2D::new(Velocity2D::new(1.0, 2.0), diag(2.0, 3.0));
        let expected = 1.0 / (2.0 * PI * 6.0f64.sqrt());
        assert_relative_eq!(g.density(&Velocity2D::new(1.0, 2.0)), expected, epsilon = 1e-12);
        assert_relative_eq!(g.log_density(&Velocity2D::new(1.0, 2.0)), expected.ln(), epsilon = 1e-12);
    }

    #[test]
    fn density_integrates_to_one() {
        let g = Gaussian2D::new(Velocity2D::new(0.5, -0.5), Matrix2::new(1.0, 0.3, 0.3, 0.5));
        let mass = integrate_square(|v| g.density(v), 8.0, 200);
        assert_relative_eq!(mass, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn correlated_density_matches_closed_form() {
        let cov = Matrix2::new(2.0, 0.5, 0.5, 1.0);
        let g = Gaussian2D::new(Velocity2D::zeros(), cov);
        let v = Velocity2D::new(1.0, -1.0);
        let inv = cov.try_inverse().unwrap();
        let d2 = (v.transpose() * inv * v)[(0, 0)];
        let expected = (-0.5 * d2).exp() / (2.0 * PI * cov.determinant().sqrt());
        assert_relative_eq!(g.density(&v), expected, epsilon = 1e-12);
        assert_relative_eq!(g.mahalanobis_squared(&v).unwrap(), d2, epsilon = 1e-12);
    }

    #[test]
    fn singular_covariance_has_zero_density() {
        let g = Gaussian2D::new(Velocity2D::zeros(), Covariance2::zeros());
        assert_eq!(g.density(&Velocity2D::zeros()), 0.0);
        assert_eq!(g.log_density(&Velocity2D::zeros()), f64::NEG_INFINITY);
        assert!(g.mahalanobis_squared(&Velocity2D::zeros()).is_none());
    }

    #[test]
    fn non_symmetric_covariance_has_zero_density() {
        let g = Gaussian2D::new(Velocity2D::zeros(), Matrix2::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(g.density(&Velocity2D::zeros()), 0.0);
    }

    #[test]
    fn try_new_validates() {
        assert!(Gaussian2D::try_new(Velocity2D::zeros(), diag(1.0, 2.0)).is_ok());
        assert!(Gaussian2D::try_new(Velocity2D::zeros(), Covariance2::zeros()).is_ok());
        assert_eq!(
            Gaussian2D::try_new(Velocity2D::zeros(), diag(1.0, -1.0)),
            Err(DistError::MalformedCovariance)
        );
        assert_eq!(
            Gaussian2D::try_new(Velocity2D::zeros(), Matrix2::new(1.0, 0.5, 0.0, 1.0)),
            Err(DistError::MalformedCovariance)
        );
    }

    #[test]
    fn sample_statistics_converge() {
        let g = Gaussian2D::new(Velocity2D::new(1.0, -2.0), Matrix2::new(1.0, 0.4, 0.4, 0.5));
        let mut rng = SmallRng::seed_from_u64(7);
        let n = 20_000;
        let samples: Vec<Velocity2D> = (0..n).map(|_| g.sample(&mut rng)).collect();
        let mean = samples.iter().fold(Velocity2D::zeros(), |a, s| a + s) / n as f64;
        assert_relative_eq!(mean.x, 1.0, epsilon = 0.05);
        assert_relative_eq!(mean.y, -2.0, epsilon = 0.05);

        let cov = samples
            .iter()
            .fold(Covariance2::zeros(), |a, s| a + (s - mean) * (s - mean).transpose())
            / n as f64;
        assert_relative_eq!(cov[(0, 1)], 0.4, epsilon = 0.05);
        assert_relative_eq!(cov[(1, 1)], 0.5, epsilon = 0.05);
    }

    #[test]
    fn zero_covariance_samples_mean() {
        let g = Gaussian2D::new(Velocity2D::new(3.0, 4.0), Covariance2::zeros());
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(g.sample(&mut rng), Velocity2D::new(3.0, 4.0));
    }

    #[test]
    fn integrate_shifts_and_scales() {
        let g = Gaussian2D::new(Velocity2D::new(1.0, 0.0), diag(1.0, 4.0));
        let p = g.integrate(&Velocity2D::new(10.0, 10.0), 0.5);
        assert_relative_eq!(p.mean.x, 10.5);
        assert_relative_eq!(p.mean.y, 10.0);
        assert_relative_eq!(p.covariance[(0, 0)], 0.25);
        assert_relative_eq!(p.covariance[(1, 1)], 1.0);
    }
}

// ── GaussianMixture2D ─────────────────────────────────────────────────────────

#[cfg(test)]
mod mixture {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::{DistError, GaussianMixture2D, VelocityDistribution};

    #[test]
    fn empty_mixture_rejected() {
        assert_eq!(GaussianMixture2D::new(vec![]), Err(DistError::EmptyMixture));
        assert_eq!(GaussianMixture2D::from_unnormalized(vec![]), Err(DistError::EmptyMixture));
        assert_eq!(GaussianMixture2D::uniform(Vec::new()), Err(DistError::EmptyMixture));
    }

    #[test]
    fn weights_must_sum_to_one() {
        let err = GaussianMixture2D::new(vec![mode(0.0, 0.0, 0.3), mode(1.0, 0.0, 0.3), mode(2.0, 0.0, 0.3)])
            .unwrap_err();
        assert!(matches!(err, DistError::WeightSum { sum } if (sum - 0.9).abs() < 1e-12));
        assert!(GaussianMixture2D::new(vec![mode(0.0, 0.0, 0.5), mode(1.0, 0.0, 0.5)]).is_ok());
    }

    #[test]
    fn weight_sum_tolerance() {
        let within = GaussianMixture2D::new(vec![mode(0.0, 0.0, 0.5), mode(1.0, 0.0, 0.5 + 5e-7)]);
        assert!(within.is_ok());
        let outside = GaussianMixture2D::new(vec![mode(0.0, 0.0, 0.5), mode(1.0, 0.0, 0.5 + 1e-5)]);
        assert!(outside.is_err());
    }

    #[test]
    fn lone_weight_just_above_one_accepted() {
        assert!(GaussianMixture2D::new(vec![mode(0.0, 0.0, 1.0 + 1e-9)]).is_ok());
        let err = GaussianMixture2D::new(vec![mode(0.0, 0.0, 1.0 + 1e-3)]).unwrap_err();
        assert!(matches!(err, DistError::WeightOutOfRange { index: 0, .. }));
    }

    #[test]
    fn equal_weights_pass_validation() {
        for n in [1usize, 2, 5, 100] {
            let modes = vec![mode(0.5, -0.5, 1.0 / n as f64); n];
            let m = GaussianMixture2D::new(modes).unwrap();
            assert_eq!(m.len(), n);
            assert!(m.weights().all(|w| w == 1.0 / n as f64));
        }
    }

    #[test]
    fn weight_out_of_range_rejected() {
        let err = GaussianMixture2D::new(vec![mode(0.0, 0.0, 1.5), mode(1.0, 0.0, -0.5)]).unwrap_err();
        assert_eq!(err, DistError::WeightOutOfRange { index: 0, weight: 1.5 });

        let err = GaussianMixture2D::new(vec![mode(0.0, 0.0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, DistError::WeightOutOfRange { index: 0, .. }));
    }

    #[test]
    fn from_unnormalized_divides_by_total() {
        let m = GaussianMixture2D::from_unnormalized(vec![mode(0.0, 0.0, 2.0), mode(1.0, 0.0, 6.0)]).unwrap();
        let w: Vec<f64> = m.weights().collect();
        assert_relative_eq!(w[0], 0.25);
        assert_relative_eq!(w[1], 0.75);
    }

    #[test]
    fn from_unnormalized_rejects_zero_total() {
        let err = GaussianMixture2D::from_unnormalized(vec![mode(0.0, 0.0, 0.0), mode(1.0, 0.0, 0.0)]);
        assert_eq!(err, Err(DistError::DegenerateWeights { total: 0.0 }));
    }

    #[test]
    fn uniform_weights() {
        for n in [1usize, 2, 5, 100] {
            let m = GaussianMixture2D::uniform((0..n).map(|i| {
                Gaussian2D::new(Velocity2D::new(i as f64, 0.0), Covariance2::identity())
            }))
            .unwrap();
            assert_eq!(m.len(), n);
            for w in m.weights() {
                assert_relative_eq!(w, 1.0 / n as f64, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn single_gaussian_conversion() {
        let g = Gaussian2D::new(Velocity2D::new(0.1, 0.7), diag(0.3, 0.05));
        let m = GaussianMixture2D::from(g.clone());
        assert_eq!(m.len(), 1);
        assert_eq!(m.mean(), g.mean());
        assert_eq!(m.covariance(), g.covariance());
        let v = Velocity2D::new(0.3, 2.5);
        assert_relative_eq!(m.density(&v), g.density(&v), epsilon = 1e-15);
    }

    #[test]
    fn tight_variance_survives_large_mean() {
        let m = GaussianMixture2D::from(Gaussian2D::new(Velocity2D::new(30.0, 0.0), diag(1e-14, 1e-14)));
        assert_eq!(m.covariance(), diag(1e-14, 1e-14));

        let two = GaussianMixture2D::new(vec![
            Mode::new(Velocity2D::new(30.0, 0.0), diag(1e-14, 1e-14), 0.5),
            Mode::new(Velocity2D::new(30.0, 0.0), diag(1e-14, 1e-14), 0.5),
        ])
        .unwrap();
        assert_relative_eq!(two.covariance()[(0, 0)], 1e-14, max_relative = 1e-9);
    }

    #[test]
    fn moments_follow_total_covariance() {
        let m = GaussianMixture2D::new(vec![mode(-1.0, 0.0, 0.5), mode(1.0, 0.0, 0.5)]).unwrap();
        assert_relative_eq!(m.mean(), Velocity2D::zeros(), epsilon = 1e-12);
        let cov = m.covariance();
        // Within-mode variance 1 plus between-mode spread 1 on x.
        assert_relative_eq!(cov[(0, 0)], 2.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(1, 1)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(cov[(0, 1)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn density_is_weighted_sum_and_integrates_to_one() {
        let m = GaussianMixture2D::new(vec![mode(-1.0, 0.0, 0.25), mode(2.0, 1.0, 0.75)]).unwrap();
        let v = Velocity2D::new(0.5, 0.5);
        let expected = 0.25 * mode(-1.0, 0.0, 1.0).gaussian().density(&v)
            + 0.75 * mode(2.0, 1.0, 1.0).gaussian().density(&v);
        assert_relative_eq!(m.density(&v), expected, epsilon = 1e-15);
        assert_relative_eq!(m.log_density(&v), expected.ln(), epsilon = 1e-12);
        assert_relative_eq!(integrate_square(|v| m.density(v), 9.0, 240), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn log_density_survives_far_tails() {
        let m = GaussianMixture2D::new(vec![mode(0.0, 0.0, 0.5), mode(1.0, 0.0, 0.5)]).unwrap();
        let far = Velocity2D::new(100.0, 0.0);
        assert_eq!(m.density(&far), 0.0);
        assert!(m.log_density(&far).is_finite());
    }

    #[test]
    fn dominant_mode_ties_go_to_lowest_index() {
        let m = GaussianMixture2D::new(vec![mode(0.0, 0.0, 0.2), mode(1.0, 0.0, 0.4), mode(2.0, 0.0, 0.4)])
            .unwrap();
        assert_eq!(m.dominant_mode(), 1);

        let flat = GaussianMixture2D::uniform(vec![Gaussian2D::default(); 4]).unwrap();
        assert_eq!(flat.dominant_mode(), 0);
    }

    #[test]
    fn reweighted_preserves_order() {
        let m = GaussianMixture2D::new(vec![mode(0.0, 0.0, 0.5), mode(1.0, 0.0, 0.5)]).unwrap();
        let r = m.reweighted(&[1.0, 3.0]).unwrap();
        assert_eq!(r.modes()[0].mean, Velocity2D::new(0.0, 0.0));
        assert_relative_eq!(r.modes()[1].weight, 0.75);
        assert_eq!(
            m.reweighted(&[1.0]),
            Err(DistError::ModeCountMismatch { expected: 2, got: 1 })
        );
    }

    #[test]
    fn sampling_respects_weights() {
        let tight = Covariance2::identity() * 1e-4;
        let m = GaussianMixture2D::new(vec![
            Mode::new(Velocity2D::new(-5.0, 0.0), tight, 0.2),
            Mode::new(Velocity2D::new(5.0, 0.0), tight, 0.8),
        ])
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(99);
        let n = 10_000;
        let right = (0..n).filter(|_| m.sample(&mut rng).x > 0.0).count();
        assert_relative_eq!(right as f64 / n as f64, 0.8, epsilon = 0.03);
    }

    #[test]
    fn integrate_keeps_weights() {
        let m = GaussianMixture2D::new(vec![mode(1.0, 0.0, 0.3), mode(0.0, 1.0, 0.7)]).unwrap();
        let p = m.integrate(&Velocity2D::new(1.0, 1.0), 2.0);
        assert_eq!(p.modes()[0].mean, Velocity2D::new(3.0, 1.0));
        assert_eq!(p.modes()[1].covariance, Covariance2::identity() * 4.0);
        assert_eq!(p.weights().collect::<Vec<_>>(), vec![0.3, 0.7]);
    }
}
