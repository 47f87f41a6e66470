//! Feature Drift
//!
//! Flags externally computed features sitting outside their normal range.
//! Each extreme feature adds its configured weight; the total is capped at
//! the component maximum.

use log::debug;

use super::{BehaviorScorer, Component, ScoreOutcome, ScoringInput};
use crate::config::FeatureDriftConfig;

/// Feature extremity scorer
#[derive(Debug, Clone, Copy)]
pub struct FeatureDriftScorer {
    config: FeatureDriftConfig,
}

impl FeatureDriftScorer {
    pub fn new(config: FeatureDriftConfig) -> Self {
        Self { config }
    }
}

impl BehaviorScorer for FeatureDriftScorer {
    fn component(&self) -> Component {
        Component::FeatureDrift
    }

    fn score(&self, input: &ScoringInput<'_>) -> ScoreOutcome {
        let Some(features) = input.features else {
            return ScoreOutcome::InsufficientData;
        };

        let checks = [
            (
                "momentum_beta_20d",
                features.momentum_beta_20d.map(f64::abs),
                self.config.momentum_beta,
            ),
            (
                "holding_period_avg",
                features.holding_period_avg,
                self.config.holding_period,
            ),
            (
                "aggressiveness",
                features.aggressiveness,
                self.config.aggressiveness,
            ),
        ];

        let mut drift = 0.0;
        for (name, value, rule) in checks {
            if let Some(value) = value {
                if !value.is_finite() {
                    return ScoreOutcome::ComputationError(format!("{name} is not finite"));
                }
                if rule.is_extreme(value) {
                    debug!("{name} = {value} outside [{}, {}]", rule.low, rule.high);
                    drift += rule.weight;
                }
            }
        }

        ScoreOutcome::Computed(drift.min(Component::FeatureDrift.max_score()))
    }
}
