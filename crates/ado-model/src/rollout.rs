//! What-if unrolling of an ado's future motion.
//!
//! Every function here works on a private copy of the ado's state; the ado
//! itself is only borrowed immutably.  Each step queries the model with the
//! hypothetical history built so far, so history-conditioned models react to
//! their own predictions.

use ado_core::Trajectory;
use ado_dist::VelocityDistribution;
use rand::Rng;

use crate::{Ado, ModelResult, VelocityModel};

/// Unroll `steps` steps of `dt` seconds, moving with the vPDF mean each step.
///
/// Returns only the predicted positions (`steps` entries).
pub fn unroll_mean<M: VelocityModel>(ado: &Ado<M>, steps: usize, dt: f64) -> ModelResult<Trajectory> {
    let mut state = ado.state().clone();
    let mut predicted = Trajectory::with_capacity(steps);
    for _ in 0..steps {
        let velocity = ado.model().vpdf(state.history()).mean();
        predicted.push(state.advance(&velocity, dt)?)?;
    }
    Ok(predicted)
}

/// Like [`unroll_mean`] but draws each step's velocity from the vPDF.
pub fn unroll_sampled<M, R>(ado: &Ado<M>, steps: usize, dt: f64, rng: &mut R) -> ModelResult<Trajectory>
where
    M: VelocityModel,
    R: Rng + ?Sized,
{
    let mut state = ado.state().clone();
    let mut predicted = Trajectory::with_capacity(steps);
    for _ in 0..steps {
        let velocity = ado.model().vpdf(state.history()).sample(rng);
        predicted.push(state.advance(&velocity, dt)?)?;
    }
    Ok(predicted)
}

/// Distribution of the ado's position one step of `dt` seconds ahead.
pub fn position_distribution<M: VelocityModel>(ado: &Ado<M>, dt: f64) -> M::Dist {
    ado.vpdf_current().integrate(ado.position(), dt)
}
