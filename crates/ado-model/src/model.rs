//! The `VelocityModel` trait: the capability every ado variant provides.

use ado_core::Trajectory;
use ado_dist::VelocityDistribution;

/// Maps a trajectory history to a distribution over next-step velocity.
///
/// This is the only thing a new model variant has to implement; position,
/// history and stepping are handled by [`Ado`][crate::Ado].
///
/// # Contract
///
/// - `vpdf` is a query: it must not depend on hidden mutable state, and two
///   calls with the same history return equal distributions.
/// - `history` may be empty and need not be the ado's own history, which
///   enables what-if queries.  Entries are chronologically ordered.
/// - `vpdf` is total: it never fails for a model that was constructed
///   successfully, and runs in O(modes).
///
/// # Thread safety
///
/// Models are `Send + Sync` so many threads can query the same ado at once.
///
/// # Example
///
/// ```rust
/// use ado_core::{Trajectory, Velocity2D, Covariance2};
/// use ado_dist::Gaussian2D;
/// use ado_model::VelocityModel;
///
/// /// Always walks east at 1 m/s with unit uncertainty.
/// struct EastWalker;
///
/// impl VelocityModel for EastWalker {
///     type Dist = Gaussian2D;
///
///     fn vpdf(&self, _history: &Trajectory) -> Gaussian2D {
///         Gaussian2D::new(Velocity2D::new(1.0, 0.0), Covariance2::identity())
///     }
///
///     fn mode_count(&self) -> usize {
///         1
///     }
/// }
/// ```
pub trait VelocityModel: Send + Sync {
    /// The distribution type returned by [`vpdf`](Self::vpdf).
    type Dist: VelocityDistribution;

    /// Velocity distribution for the step following `history`.
    fn vpdf(&self, history: &Trajectory) -> Self::Dist;

    /// Number of Gaussian modes this model predicts.
    fn mode_count(&self) -> usize;
}

impl<M: VelocityModel + ?Sized> VelocityModel for Box<M> {
    type Dist = M::Dist;

    #[inline]
    fn vpdf(&self, history: &Trajectory) -> Self::Dist {
        (**self).vpdf(history)
    }

    #[inline]
    fn mode_count(&self) -> usize {
        (**self).mode_count()
    }
}
