//! Pattern Instability
//!
//! Compares how volatile the client's daily activity has been over the last
//! week against the whole history. Two series are tracked: daily volume and
//! daily instrument count. For each, the rolling variance over the last
//! [`RECENT_DAYS`] is divided by the rolling variance over all days; the
//! score is the average ratio scaled by [`RATIO_SCALE`].

use log::debug;

use super::{BehaviorScorer, Component, ScoreOutcome, ScoringInput};
use crate::stats;

/// Minimum trading days before the statistic is attempted
pub const MIN_DAYS: usize = 7;
/// Trailing days treated as "recent"
pub const RECENT_DAYS: usize = 7;
/// Variance ratio to score multiplier
pub const RATIO_SCALE: f64 = 0.10;
const VARIANCE_EPSILON: f64 = 1e-6;

/// Rolling-variance instability scorer
#[derive(Debug, Clone)]
pub struct PatternInstabilityScorer {
    window: usize,
}

impl PatternInstabilityScorer {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(2),
        }
    }

    /// Recent-to-overall rolling variance ratio for one series
    fn variance_ratio(&self, series: &[f64]) -> Result<f64, String> {
        let rolling = stats::rolling_variance(series, self.window);
        let overall: Vec<f64> = rolling.iter().flatten().copied().collect();
        let recent_start = rolling.len().saturating_sub(RECENT_DAYS);
        let recent: Vec<f64> = rolling[recent_start..].iter().flatten().copied().collect();

        let overall_mean = stats::mean(&overall).ok_or_else(|| {
            format!(
                "{} days is shorter than the {}-day window",
                series.len(),
                self.window
            )
        })?;
        let recent_mean =
            stats::mean(&recent).ok_or_else(|| "no full window in recent days".to_string())?;

        Ok(recent_mean / (overall_mean + VARIANCE_EPSILON))
    }
}

impl BehaviorScorer for PatternInstabilityScorer {
    fn component(&self) -> Component {
        Component::PatternInstability
    }

    fn score(&self, input: &ScoringInput<'_>) -> ScoreOutcome {
        let days = input.history.len();
        if days < MIN_DAYS {
            debug!("pattern instability needs {MIN_DAYS} days, have {days}");
            return ScoreOutcome::InsufficientData;
        }

        let volume_ratio = match self.variance_ratio(&input.history.daily_volume()) {
            Ok(ratio) => ratio,
            Err(reason) => return ScoreOutcome::ComputationError(reason),
        };
        let instrument_ratio = match self.variance_ratio(&input.history.daily_instruments()) {
            Ok(ratio) => ratio,
            Err(reason) => return ScoreOutcome::ComputationError(reason),
        };

        let ratio = (volume_ratio + instrument_ratio) / 2.0;
        ScoreOutcome::Computed((ratio * RATIO_SCALE).min(Component::PatternInstability.max_score()))
    }
}
