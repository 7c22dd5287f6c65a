use ado_core::{AdoId, CoreError};
use ado_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("ado {ado} failed to step: {source}")]
    Model {
        ado:    AdoId,
        #[source]
        source: ModelError,
    },
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
