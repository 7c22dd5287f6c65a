use ado_core::CoreError;
use ado_dist::DistError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid model parameters: {0}")]
    InvalidParameters(#[from] DistError),

    #[error("invalid time step {0}: must be positive and finite")]
    InvalidStep(f64),

    #[error("non-finite velocity ({vx}, {vy})")]
    NonFiniteVelocity { vx: f64, vy: f64 },

    #[error("history update rejected: {0}")]
    History(#[from] CoreError),
}

pub type ModelResult<T> = Result<T, ModelError>;
