//! Multi-mode model: a weighted Gaussian mixture over velocity.

use ado_core::Trajectory;
use ado_dist::{GaussianMixture2D, Mode, VelocityDistribution};
use tracing::debug;

use crate::{ModelResult, VelocityModel};

/// How [`MultiMode::vpdf`] turns the stored weights into returned weights.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ModeWeighting {
    /// Return the stored mixture unchanged, whatever the history.
    #[default]
    Fixed,

    /// Bayesian re-weighting by the most recent observed velocity:
    /// `wᵢ' ∝ wᵢ · N(v_obs; μᵢ, Σᵢ)`.
    ///
    /// `v_obs` is the finite difference of the last two history entries.
    /// With fewer than two entries, or when no mode assigns the observation
    /// any density, the stored weights are returned.
    HistoryLikelihood,
}

/// A Gaussian mixture model of behavioural ambiguity ("turn left" vs. "go
/// straight").
///
/// Construction guarantees a non-empty mode set whose weights lie in
/// `[0, 1]` and sum to 1; mode order is kept as supplied.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiMode {
    mixture:   GaussianMixture2D,
    weighting: ModeWeighting,
}

impl MultiMode {
    /// Validate `modes` and build a model with [`ModeWeighting::Fixed`].
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameters`][crate::ModelError::InvalidParameters]
    /// if `modes` is empty or its weights are out of range or do not sum to
    /// 1 within [`WEIGHT_TOLERANCE`][ado_dist::WEIGHT_TOLERANCE].
    pub fn new(modes: Vec<Mode>) -> ModelResult<Self> {
        let mixture = GaussianMixture2D::new(modes)?;
        debug!(modes = mixture.len(), "multi-mode model constructed");
        Ok(Self::from_mixture(mixture))
    }

    /// Wrap an already validated mixture.
    pub fn from_mixture(mixture: GaussianMixture2D) -> Self {
        Self { mixture, weighting: ModeWeighting::Fixed }
    }

    pub fn with_weighting(mut self, weighting: ModeWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// The stored (prior) mixture.
    #[inline]
    pub fn mixture(&self) -> &GaussianMixture2D {
        &self.mixture
    }

    #[inline]
    pub fn weighting(&self) -> ModeWeighting {
        self.weighting
    }

    fn posterior(&self, history: &Trajectory) -> GaussianMixture2D {
        let Some(observed) = history.latest_velocity() else {
            return self.mixture.clone();
        };

        // Work in log space so an observation far from every mode still
        // ranks the modes instead of underflowing all of them to zero.
        let log_weights: Vec<f64> = self
            .mixture
            .modes()
            .iter()
            .map(|m| m.weight.ln() + m.gaussian().log_density(&observed))
            .collect();
        let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return self.mixture.clone();
        }
        let weights: Vec<f64> = log_weights.iter().map(|l| (l - max).exp()).collect();

        self.mixture
            .reweighted(&weights)
            .unwrap_or_else(|_| self.mixture.clone())
    }
}

impl VelocityModel for MultiMode {
    type Dist = GaussianMixture2D;

    fn vpdf(&self, history: &Trajectory) -> GaussianMixture2D {
        match self.weighting {
            ModeWeighting::Fixed => self.mixture.clone(),
            ModeWeighting::HistoryLikelihood => self.posterior(history),
        }
    }

    #[inline]
    fn mode_count(&self) -> usize {
        self.mixture.len()
    }
}
