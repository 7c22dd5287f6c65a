//! Weighted Gaussian mixtures for multi-modal velocity predictions.

use ado_core::{Covariance2, Position2D, Velocity2D};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::{DistError, DistResult, Gaussian2D, VelocityDistribution};

/// How far the mode weights of a mixture may sum away from 1.
///
/// The same slack applies to the upper bound of a single weight, so a lone
/// mode of weight `1.0 + 1e-9` is accepted.  Negative weights are always
/// rejected.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// One weighted component of a mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct Mode {
    pub mean:       Velocity2D,
    pub covariance: Covariance2,
    /// Mixing weight in `[0, 1]`.
    pub weight:     f64,
}

impl Mode {
    #[inline]
    pub fn new(mean: Velocity2D, covariance: Covariance2, weight: f64) -> Self {
        Self { mean, covariance, weight }
    }

    /// The component as a standalone Gaussian (weight dropped).
    #[inline]
    pub fn gaussian(&self) -> Gaussian2D {
        Gaussian2D::new(self.mean, self.covariance)
    }
}

// ── GaussianMixture2D ─────────────────────────────────────────────────────────

/// A non-empty, normalised mixture of bivariate Gaussians.
///
/// Every constructor guarantees at least one mode, no negative weight,
/// and a weight sum within [`WEIGHT_TOLERANCE`] of 1.  Mode order is
/// preserved exactly as supplied.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianMixture2D {
    modes: Vec<Mode>,
}

impl GaussianMixture2D {
    /// Validate and store `modes`.
    ///
    /// # Errors
    ///
    /// - [`DistError::EmptyMixture`] if `modes` is empty.
    /// - [`DistError::WeightOutOfRange`] for a weight outside
    ///   `[0, 1 + WEIGHT_TOLERANCE]`.
    /// - [`DistError::WeightSum`] if the weights do not sum to 1.
    pub fn new(modes: Vec<Mode>) -> DistResult<Self> {
        if modes.is_empty() {
            return Err(DistError::EmptyMixture);
        }
        for (index, mode) in modes.iter().enumerate() {
            if !(0.0..=1.0 + WEIGHT_TOLERANCE).contains(&mode.weight) {
                return Err(DistError::WeightOutOfRange { index, weight: mode.weight });
            }
        }
        let sum: f64 = modes.iter().map(|m| m.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(DistError::WeightSum { sum });
        }
        Ok(Self { modes })
    }

    /// Divide the weights by their total so they sum to 1.
    ///
    /// Weights must be finite and non-negative with a positive total.
    pub fn from_unnormalized(mut modes: Vec<Mode>) -> DistResult<Self> {
        if modes.is_empty() {
            return Err(DistError::EmptyMixture);
        }
        for (index, mode) in modes.iter().enumerate() {
            if !(mode.weight.is_finite() && mode.weight >= 0.0) {
                return Err(DistError::WeightOutOfRange { index, weight: mode.weight });
            }
        }
        let total: f64 = modes.iter().map(|m| m.weight).sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(DistError::DegenerateWeights { total });
        }
        for mode in &mut modes {
            mode.weight /= total;
        }
        Ok(Self { modes })
    }

    /// Equal-weight mixture of `components`.
    pub fn uniform<I>(components: I) -> DistResult<Self>
    where
        I: IntoIterator<Item = Gaussian2D>,
    {
        let components: Vec<Gaussian2D> = components.into_iter().collect();
        if components.is_empty() {
            return Err(DistError::EmptyMixture);
        }
        let weight = 1.0 / components.len() as f64;
        let modes = components
            .into_iter()
            .map(|g| Mode::new(g.mean, g.covariance, weight))
            .collect();
        Ok(Self { modes })
    }

    #[inline]
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    #[inline]
    pub fn mode(&self, index: usize) -> Option<&Mode> {
        self.modes.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Always `false`; kept for symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.modes.iter().map(|m| m.weight)
    }

    /// Index of the heaviest mode.  Ties go to the lowest index.
    pub fn dominant_mode(&self) -> usize {
        let mut best = 0;
        for (i, mode) in self.modes.iter().enumerate().skip(1) {
            if mode.weight > self.modes[best].weight {
                best = i;
            }
        }
        best
    }

    /// Copy of this mixture with `weights[i]` (unnormalised) replacing the
    /// weight of mode `i`.
    pub fn reweighted(&self, weights: &[f64]) -> DistResult<Self> {
        if weights.len() != self.modes.len() {
            return Err(DistError::ModeCountMismatch {
                expected: self.modes.len(),
                got:      weights.len(),
            });
        }
        let modes = self
            .modes
            .iter()
            .zip(weights)
            .map(|(m, &w)| Mode::new(m.mean, m.covariance, w))
            .collect();
        Self::from_unnormalized(modes)
    }
}

impl From<Gaussian2D> for GaussianMixture2D {
    fn from(g: Gaussian2D) -> Self {
        Self { modes: vec![Mode::new(g.mean, g.covariance, 1.0)] }
    }
}

impl VelocityDistribution for GaussianMixture2D {
    fn mean(&self) -> Velocity2D {
        self.modes
            .iter()
            .fold(Velocity2D::zeros(), |acc, m| acc + m.mean * m.weight)
    }

    /// Law of total covariance in centred form: `Σ wᵢ (Σᵢ + dᵢdᵢᵀ)` with
    /// `dᵢ = μᵢ − μ`.  A one-mode mixture returns its covariance unchanged.
    fn covariance(&self) -> Covariance2 {
        let mean = VelocityDistribution::mean(self);
        self.modes.iter().fold(Covariance2::zeros(), |acc, m| {
            let d = m.mean - mean;
            acc + (m.covariance + d * d.transpose()) * m.weight
        })
    }

    fn density(&self, velocity: &Velocity2D) -> f64 {
        self.modes
            .iter()
            .map(|m| m.weight * m.gaussian().density(velocity))
            .sum()
    }

    /// Log-sum-exp over the components so far tails do not underflow to −∞.
    fn log_density(&self, velocity: &Velocity2D) -> f64 {
        let terms: Vec<f64> = self
            .modes
            .iter()
            .map(|m| m.weight.ln() + m.gaussian().log_density(velocity))
            .collect();
        let max = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max == f64::NEG_INFINITY {
            return max;
        }
        max + terms.iter().map(|t| (t - max).exp()).sum::<f64>().ln()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Velocity2D {
        let index = WeightedIndex::new(self.modes.iter().map(|m| m.weight))
            .map(|w| w.sample(rng))
            .unwrap_or_else(|_| self.dominant_mode());
        self.modes[index].gaussian().sample(rng)
    }

    #[inline]
    fn mode_count(&self) -> usize {
        self.modes.len()
    }

    fn integrate(&self, origin: &Position2D, dt: f64) -> Self {
        let modes = self
            .modes
            .iter()
            .map(|m| Mode::new(origin + m.mean * dt, m.covariance * (dt * dt), m.weight))
            .collect();
        Self { modes }
    }
}
