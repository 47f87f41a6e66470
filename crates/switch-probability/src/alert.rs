//! Switch-probability alerts
//!
//! Compares two consecutive results for a client and decides whether the
//! change is worth surfacing to coverage teams.

use cadence_core::Timestamp;
use serde::{Deserialize, Serialize};

use crate::result::{RiskLevel, SwitchProbabilityResult};

/// Why an alert fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReason {
    /// Probability rose by at least the policy's minimum delta
    ProbabilityJump,
    /// Client crossed into HIGH risk
    EnteredHighRisk,
}

/// Alert emitted on a material switch-probability move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAlert {
    pub client_id: String,
    pub old_switch_prob: f64,
    pub new_switch_prob: f64,
    pub delta: f64,
    pub risk_level: RiskLevel,
    pub reason: AlertReason,
    pub timestamp: Timestamp,
}

/// When to raise a [`SwitchAlert`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPolicy {
    /// Smallest upward move that raises an alert
    pub min_delta: f64,
    /// Alert whenever a client newly reaches HIGH risk, regardless of delta
    pub alert_on_high_risk_entry: bool,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            min_delta: 0.05,
            alert_on_high_risk_entry: true,
        }
    }
}

impl AlertPolicy {
    /// Evaluate a transition between two results
    ///
    /// Only increases alert; a falling probability is never news.
    pub fn evaluate(
        &self,
        client_id: &str,
        previous: &SwitchProbabilityResult,
        current: &SwitchProbabilityResult,
        at: Timestamp,
    ) -> Option<SwitchAlert> {
        let delta = current.switch_prob - previous.switch_prob;
        let entered_high = current.risk_level() == RiskLevel::High
            && previous.risk_level() != RiskLevel::High;

        // Rounded probabilities: tolerate representation error at the boundary
        let reason = if self.alert_on_high_risk_entry && entered_high {
            AlertReason::EnteredHighRisk
        } else if delta + 1e-9 >= self.min_delta {
            AlertReason::ProbabilityJump
        } else {
            return None;
        };

        Some(SwitchAlert {
            client_id: client_id.to_string(),
            old_switch_prob: previous.switch_prob,
            new_switch_prob: current.switch_prob,
            delta,
            risk_level: current.risk_level(),
            reason,
            timestamp: at,
        })
    }
}
