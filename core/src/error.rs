use crate::types::MachineId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path:   String,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Machine id {id} appears more than once in the fixture")]
    DuplicateMachineId { id: MachineId },

    #[error("Invalid fixture: {reason}")]
    InvalidFixture { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
