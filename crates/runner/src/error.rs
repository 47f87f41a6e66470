//! Runner errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Scoring failed: {0}")]
    Engine(#[from] cadence_switch::Error),

    #[error("Scoring task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;
