//! Book Scoring
//!
//! Scores every client of a book concurrently and raises alerts by
//! comparing each client's probability now against a week earlier.
//!
//! The engine is synchronous and CPU-bound, so each client runs on a tokio
//! blocking task sharing one `Arc`'d engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use cadence_core::Timestamp;
use cadence_ports::ClientDataSource;
use cadence_switch::{
    RiskLevel, SwitchAlert, SwitchProbabilityEngine, SwitchProbabilityResult,
    compute_switch_probability,
};
use chrono::Duration;
use log::{info, warn};
use serde::Serialize;

use crate::error::RunnerResult;

/// Days between the two snapshots compared for alerts
pub const DEFAULT_ALERT_HORIZON_DAYS: i64 = 7;

/// One client's score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientScore {
    pub client_id: String,
    pub risk_level: RiskLevel,
    #[serde(flatten)]
    pub result: SwitchProbabilityResult,
}

/// Scores, alerts and a risk histogram for a whole book
#[derive(Debug, Clone, Serialize)]
pub struct BookReport {
    pub as_of: Timestamp,
    pub scores: Vec<ClientScore>,
    pub alerts: Vec<SwitchAlert>,
    pub risk_counts: BTreeMap<String, usize>,
}

impl BookReport {
    pub fn high_risk(&self) -> impl Iterator<Item = &ClientScore> {
        self.scores
            .iter()
            .filter(|s| s.risk_level == RiskLevel::High)
    }
}

/// Concurrent scorer over a client data source
#[derive(Clone)]
pub struct BookScorer {
    engine: Arc<SwitchProbabilityEngine>,
    source: Arc<dyn ClientDataSource>,
}

impl BookScorer {
    pub fn new(engine: Arc<SwitchProbabilityEngine>, source: Arc<dyn ClientDataSource>) -> Self {
        Self { engine, source }
    }

    /// Score every client as of `as_of`, in input order
    pub async fn score_all(
        &self,
        clients: &[String],
        as_of: Timestamp,
    ) -> RunnerResult<Vec<ClientScore>> {
        let handles: Vec<_> = clients
            .iter()
            .map(|client_id| {
                let engine = Arc::clone(&self.engine);
                let source = Arc::clone(&self.source);
                let client_id = client_id.clone();
                tokio::task::spawn_blocking(move || {
                    compute_switch_probability(&engine, source.as_ref(), &client_id, as_of)
                        .map(|result| ClientScore {
                            risk_level: result.risk_level(),
                            client_id,
                            result,
                        })
                })
            })
            .collect();

        let mut scores = Vec::with_capacity(handles.len());
        for handle in handles {
            scores.push(handle.await??);
        }
        Ok(scores)
    }

    /// Score the book now and `horizon_days` earlier, and collect alerts
    pub async fn run(
        &self,
        clients: &[String],
        as_of: Timestamp,
        horizon_days: i64,
    ) -> RunnerResult<BookReport> {
        info!(
            "Scoring {} clients from {} as of {as_of}",
            clients.len(),
            self.source.name()
        );

        let previous = self
            .score_all(clients, as_of - Duration::days(horizon_days))
            .await?;
        let current = self.score_all(clients, as_of).await?;

        let policy = self.engine.config().alerts;
        let alerts: Vec<SwitchAlert> = previous
            .iter()
            .zip(&current)
            .filter_map(|(before, now)| {
                policy.evaluate(&now.client_id, &before.result, &now.result, as_of)
            })
            .collect();

        for alert in &alerts {
            warn!(
                "ALERT {}: {:.2} -> {:.2} ({:?})",
                alert.client_id, alert.old_switch_prob, alert.new_switch_prob, alert.reason
            );
        }

        let mut risk_counts = BTreeMap::new();
        for score in &current {
            *risk_counts
                .entry(format!("{:?}", score.risk_level).to_uppercase())
                .or_insert(0) += 1;
        }

        info!(
            "Book scored: {} clients, {} alerts",
            current.len(),
            alerts.len()
        );

        Ok(BookReport {
            as_of,
            scores: current,
            alerts,
            risk_counts,
        })
    }
}
