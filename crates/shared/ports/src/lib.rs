//! Cadence Ports
//!
//! Port definitions (traits) for Cadence.
//! These define the boundary between analytics and whatever stores client data.

mod data_source;
mod error;
pub mod memory;

pub use data_source::ClientDataSource;
pub use error::{DataSourceError, DataSourceResult};
pub use memory::{ClientRecord, InMemoryDataSource};
