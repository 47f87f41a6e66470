//! Flip Acceleration
//!
//! Recent flip frequency against the client's own baseline. Flipping faster
//! than usual suggests the client is losing conviction in their current
//! approach.

use log::debug;

use super::{BehaviorScorer, Component, ScoreOutcome, ScoringInput};
use crate::config::FlipAccelerationConfig;
use crate::stats;

const MIN_BASELINE_RATE: f64 = 1e-6;

/// Recent-vs-baseline flip rate scorer
#[derive(Debug, Clone)]
pub struct FlipAccelerationScorer {
    config: FlipAccelerationConfig,
}

impl FlipAccelerationScorer {
    pub fn new(config: FlipAccelerationConfig) -> Self {
        Self { config }
    }

    /// Mean recent flips divided by mean baseline flips
    ///
    /// `None` when either side is empty or the baseline is effectively zero.
    pub fn acceleration_ratio(&self, flips: &[f64]) -> Option<f64> {
        let split = flips.len().checked_sub(self.config.recent_days)?;
        let recent = stats::mean(&flips[split..])?;
        let baseline = stats::mean(&flips[..split])?;
        if baseline < MIN_BASELINE_RATE {
            return None;
        }
        Some(recent / baseline)
    }
}

impl BehaviorScorer for FlipAccelerationScorer {
    fn component(&self) -> Component {
        Component::FlipAcceleration
    }

    fn score(&self, input: &ScoringInput<'_>) -> ScoreOutcome {
        let flips = input.history.daily_flips();
        if flips.len() < self.config.min_days {
            debug!(
                "flip acceleration needs {} days, have {}",
                self.config.min_days,
                flips.len()
            );
            return ScoreOutcome::InsufficientData;
        }

        match self.acceleration_ratio(&flips) {
            Some(ratio) => {
                debug!("flip acceleration ratio {ratio:.2}");
                ScoreOutcome::Computed(self.config.score_for_ratio(ratio))
            }
            None => ScoreOutcome::ComputationError("no baseline flip activity".into()),
        }
    }
}
