//! Switch-probability errors
//!
//! Only input-contract violations and configuration problems surface here.
//! Sparse or degenerate histories never produce an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid trade at index {index}: {reason}")]
    InvalidTrade { index: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Result violates output contract: {0}")]
    InvalidResult(String),

    #[error("Failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
