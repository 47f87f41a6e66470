use cadence_core::{FeatureSet, PositionSnapshot, Timestamp, TradeRecord};

use crate::error::DataSourceResult;

/// Port for reading a client's activity
///
/// Implementations own storage and retrieval (database, cache, fixtures).
/// Analytics only consume what a source returns and never write back.
pub trait ClientDataSource: Send + Sync {
    /// Executions at or after `since`, in the order the source stores them
    fn trades(&self, client_id: &str, since: Timestamp) -> DataSourceResult<Vec<TradeRecord>>;

    /// Latest position snapshot, if the source tracks one
    fn positions(&self, client_id: &str) -> DataSourceResult<Option<PositionSnapshot>>;

    /// Pre-computed behavioral features, if available
    fn features(&self, client_id: &str) -> DataSourceResult<Option<FeatureSet>>;

    /// Get the source's name/identifier for debugging
    fn name(&self) -> &str {
        "ClientDataSource"
    }
}
