//! The `Ado<M>` agent entity.

use ado_core::{AdoId, Covariance2, Position2D, TimedPosition, Trajectory, Velocity2D};
use ado_dist::Mode;
use tracing::{debug, trace};

use crate::{AdoState, AnyModel, ModelResult, MultiMode, SingleMode, VelocityModel};

/// An observed agent: its state plus the model that predicts its velocity.
///
/// `Ado<M>` exclusively owns its history and model parameters.  All fields
/// are private; callers read through accessors and mutate only through
/// [`advance`](Self::advance), [`observe`](Self::observe) and
/// [`reset`](Self::reset).
#[derive(Clone, Debug, PartialEq)]
pub struct Ado<M: VelocityModel> {
    id:    AdoId,
    state: AdoState,
    model: M,
}

impl<M: VelocityModel> Ado<M> {
    pub fn new(id: AdoId, state: AdoState, model: M) -> Self {
        debug!(
            ado = %id,
            x = state.position().x,
            y = state.position().y,
            history = state.history().len(),
            modes = model.mode_count(),
            "ado created"
        );
        Self { id, state, model }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AdoId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> &Position2D {
        self.state.position()
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.state.time()
    }

    #[inline]
    pub fn history(&self) -> &Trajectory {
        self.state.history()
    }

    #[inline]
    pub fn state(&self) -> &AdoState {
        &self.state
    }

    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[inline]
    pub fn mode_count(&self) -> usize {
        self.model.mode_count()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Velocity distribution for the step after `history`.
    ///
    /// `history` need not be this ado's own; the ado is never modified.
    #[inline]
    pub fn vpdf(&self, history: &Trajectory) -> M::Dist {
        self.model.vpdf(history)
    }

    /// [`vpdf`](Self::vpdf) conditioned on the ado's own history.
    #[inline]
    pub fn vpdf_current(&self) -> M::Dist {
        self.model.vpdf(self.state.history())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Move with `velocity` for `dt` seconds; see [`AdoState::advance`].
    pub fn advance(&mut self, velocity: &Velocity2D, dt: f64) -> ModelResult<TimedPosition> {
        let next = self.state.advance(velocity, dt)?;
        trace!(ado = %self.id, t = next.time, x = next.position.x, y = next.position.y, "ado advanced");
        Ok(next)
    }

    /// Record an externally observed position.
    pub fn observe(&mut self, position: Position2D, time: f64) -> ModelResult<()> {
        self.state.observe(position, time)
    }

    /// Replace position and history together.
    pub fn reset(&mut self, position: Position2D, history: Trajectory) {
        self.state.reset(position, history);
    }

    /// Swap the model for one convertible into [`AnyModel`].
    pub fn into_any(self) -> Ado<AnyModel>
    where
        M: Into<AnyModel>,
    {
        Ado { id: self.id, state: self.state, model: self.model.into() }
    }
}

impl Ado<SingleMode> {
    /// Single-mode ado with every parameter supplied explicitly.  Nothing is
    /// validated; the covariance must be symmetric PSD.
    pub fn single_mode(
        id:         AdoId,
        position:   Position2D,
        mean:       Velocity2D,
        covariance: Covariance2,
        history:    Trajectory,
    ) -> Self {
        Self::new(
            id,
            AdoState::with_history(position, history),
            SingleMode::new(mean, covariance),
        )
    }
}

impl Default for Ado<SingleMode> {
    /// Origin, empty history, zero-mean unit-variance velocity.
    fn default() -> Self {
        Self::new(AdoId::default(), AdoState::default(), SingleMode::default())
    }
}

impl Ado<MultiMode> {
    /// Multi-mode ado with fixed weights.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameters`][crate::ModelError::InvalidParameters]
    /// for an empty mode set or weights that do not sum to 1.  No ado is
    /// returned in that case.
    pub fn multi_mode(
        id:       AdoId,
        position: Position2D,
        modes:    Vec<Mode>,
        history:  Trajectory,
    ) -> ModelResult<Self> {
        let model = MultiMode::new(modes)?;
        Ok(Self::new(id, AdoState::with_history(position, history), model))
    }
}
