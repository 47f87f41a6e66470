use thiserror::Error;

/// Failures raised by a client data source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("Unknown client: {0}")]
    UnknownClient(String),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

pub type DataSourceResult<T> = std::result::Result<T, DataSourceError>;
