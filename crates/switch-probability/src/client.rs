//! Client entry point
//!
//! Pulls a client's recent activity from a [`ClientDataSource`] and scores
//! it. The engine itself never touches storage; this is the seam where a
//! caller's data layer plugs in.

use cadence_core::Timestamp;
use cadence_ports::ClientDataSource;
use chrono::Duration;
use log::error;

use crate::engine::SwitchProbabilityEngine;
use crate::error::Result;
use crate::result::SwitchProbabilityResult;

/// Compute a client's switch probability as of `as_of`
///
/// Trades from the configured lookback window ending at `as_of` are scored.
/// A failing data source degrades to the baseline result; malformed trades
/// are still an error.
pub fn compute_switch_probability<S>(
    engine: &SwitchProbabilityEngine,
    source: &S,
    client_id: &str,
    as_of: Timestamp,
) -> Result<SwitchProbabilityResult>
where
    S: ClientDataSource + ?Sized,
{
    let config = engine.config();
    let since = as_of - Duration::days(i64::from(config.lookback_days));

    let fetched = source.trades(client_id, since).and_then(|trades| {
        let positions = source.positions(client_id)?;
        let features = source.features(client_id)?;
        Ok((trades, positions, features))
    });

    let (mut trades, positions, features) = match fetched {
        Ok(data) => data,
        Err(e) => {
            error!(
                "Error fetching data for {client_id} from {}: {e}",
                source.name()
            );
            return Ok(SwitchProbabilityResult::baseline(
                config.baseline_prob,
                format!("Error in calculation: {e}"),
            ));
        }
    };
    trades.retain(|t| t.timestamp <= as_of);

    engine.calculate(client_id, &trades, positions.as_ref(), features.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{FeatureSet, PositionSnapshot, Side, TradeRecord};
    use cadence_ports::{ClientRecord, DataSourceError, DataSourceResult, InMemoryDataSource};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    struct FailingSource;

    impl ClientDataSource for FailingSource {
        fn trades(
            &self,
            _client_id: &str,
            _since: Timestamp,
        ) -> DataSourceResult<Vec<TradeRecord>> {
            Err(DataSourceError::Unavailable("connection refused".into()))
        }

        fn positions(&self, _client_id: &str) -> DataSourceResult<Option<PositionSnapshot>> {
            Ok(None)
        }

        fn features(&self, _client_id: &str) -> DataSourceResult<Option<FeatureSet>> {
            Ok(None)
        }
    }

    fn as_of() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_source_failure_degrades_to_baseline() {
        let engine = SwitchProbabilityEngine::default();
        let result = compute_switch_probability(&engine, &FailingSource, "C1", as_of()).unwrap();

        assert_eq!(result.switch_prob, 0.30);
        assert!(result.reasoning.contains("Error in calculation"));
        assert!(result.reasoning.contains("connection refused"));
    }

    #[test]
    fn test_unknown_client_degrades_to_baseline() {
        let engine = SwitchProbabilityEngine::default();
        let source = InMemoryDataSource::new();
        let result = compute_switch_probability(&engine, &source, "NOBODY", as_of()).unwrap();
        assert!(result.reasoning.contains("Unknown client: NOBODY"));
    }

    #[test]
    fn test_trades_outside_lookback_are_ignored() {
        let engine = SwitchProbabilityEngine::default();
        let old = Utc.with_ymd_and_hms(2023, 12, 1, 12, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let recent = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();

        let source = InMemoryDataSource::new().with_client(
            "C1",
            ClientRecord {
                trades: vec![
                    TradeRecord::new(old, "EURUSD", Side::Buy, dec!(1), dec!(1.1)),
                    TradeRecord::new(old, "EURUSD", Side::Sell, dec!(1), dec!(1.1)),
                    TradeRecord::new(recent, "EURUSD", Side::Buy, dec!(1), dec!(1.1)),
                    TradeRecord::new(future, "EURUSD", Side::Sell, dec!(1), dec!(1.1)),
                ],
                ..Default::default()
            },
        );

        let result = compute_switch_probability(&engine, &source, "C1", as_of()).unwrap();
        assert!(result.reasoning.contains("(1 trade)"));
    }
}
