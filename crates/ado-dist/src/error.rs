use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistError {
    #[error("a mixture needs at least one mode")]
    EmptyMixture,

    #[error("mode {index} has weight {weight} outside [0, 1]")]
    WeightOutOfRange { index: usize, weight: f64 },

    #[error("mode weights sum to {sum}, expected 1")]
    WeightSum { sum: f64 },

    #[error("mode weights cannot be normalised (total {total})")]
    DegenerateWeights { total: f64 },

    #[error("expected {expected} weights, got {got}")]
    ModeCountMismatch { expected: usize, got: usize },

    #[error("covariance is not symmetric positive semi-definite")]
    MalformedCovariance,
}

pub type DistResult<T> = Result<T, DistError>;
