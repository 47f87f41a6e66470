//! In-memory data source
//!
//! Backs tests and demo runs. Holds one [`ClientRecord`] per client.

use std::collections::HashMap;

use cadence_core::{FeatureSet, PositionSnapshot, Timestamp, TradeRecord};

use crate::data_source::ClientDataSource;
use crate::error::{DataSourceError, DataSourceResult};

/// Everything known about a single client
#[derive(Debug, Clone, Default)]
pub struct ClientRecord {
    pub trades: Vec<TradeRecord>,
    pub positions: Option<PositionSnapshot>,
    pub features: Option<FeatureSet>,
}

/// Client data held in a plain map
#[derive(Debug, Default)]
pub struct InMemoryDataSource {
    clients: HashMap<String, ClientRecord>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a client's data
    pub fn insert(&mut self, client_id: impl Into<String>, record: ClientRecord) {
        self.clients.insert(client_id.into(), record);
    }

    /// Builder-style insert
    pub fn with_client(mut self, client_id: impl Into<String>, record: ClientRecord) -> Self {
        self.insert(client_id, record);
        self
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn client(&self, client_id: &str) -> DataSourceResult<&ClientRecord> {
        self.clients
            .get(client_id)
            .ok_or_else(|| DataSourceError::UnknownClient(client_id.to_string()))
    }
}

impl ClientDataSource for InMemoryDataSource {
    fn trades(&self, client_id: &str, since: Timestamp) -> DataSourceResult<Vec<TradeRecord>> {
        Ok(self
            .client(client_id)?
            .trades
            .iter()
            .filter(|t| t.timestamp >= since)
            .cloned()
            .collect())
    }

    fn positions(&self, client_id: &str) -> DataSourceResult<Option<PositionSnapshot>> {
        Ok(self.client(client_id)?.positions.clone())
    }

    fn features(&self, client_id: &str) -> DataSourceResult<Option<FeatureSet>> {
        Ok(self.client(client_id)?.features.clone())
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Side;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn source() -> InMemoryDataSource {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let trades = (0..10)
            .map(|d| {
                TradeRecord::new(
                    start + Duration::days(d),
                    "EURUSD",
                    Side::Buy,
                    dec!(1),
                    dec!(1.1),
                )
            })
            .collect();

        InMemoryDataSource::new().with_client(
            "ACME_FX_023",
            ClientRecord {
                trades,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_trades_filtered_by_since() {
        let source = source();
        let since = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap();

        let trades = source.trades("ACME_FX_023", since).unwrap();
        assert_eq!(trades.len(), 5);
        assert!(trades.iter().all(|t| t.timestamp >= since));
    }

    #[test]
    fn test_unknown_client() {
        let source = source();
        let err = source.features("NOBODY").unwrap_err();
        assert_eq!(err, DataSourceError::UnknownClient("NOBODY".to_string()));
    }

    #[test]
    fn test_trait_object() {
        let source: Box<dyn ClientDataSource> = Box::new(source());
        assert_eq!(source.name(), "in_memory");
        assert!(source.positions("ACME_FX_023").unwrap().is_none());
    }
}
