//! Momentum Shift
//!
//! How often the client's daily directional bias (net buyer, net seller or
//! flat) changes from one trading day to the next.

use log::debug;

use super::{BehaviorScorer, Component, ScoreOutcome, ScoringInput};

/// Minimum trading days before the statistic is attempted
pub const MIN_DAYS: usize = 14;
/// Sign-change rate to score multiplier
pub const RATE_SCALE: f64 = 0.40;

/// Direction-change scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumShiftScorer;

impl MomentumShiftScorer {
    /// Fraction of days whose bias differs from the day before
    ///
    /// The first day has no predecessor and counts as a change.
    pub fn sign_change_rate(directions: &[i8]) -> Option<f64> {
        if directions.is_empty() {
            return None;
        }
        let changes = 1 + directions.windows(2).filter(|w| w[0] != w[1]).count();
        Some(changes as f64 / directions.len() as f64)
    }
}

impl BehaviorScorer for MomentumShiftScorer {
    fn component(&self) -> Component {
        Component::MomentumShift
    }

    fn score(&self, input: &ScoringInput<'_>) -> ScoreOutcome {
        let directions = input.history.daily_directions();
        if directions.len() < MIN_DAYS {
            debug!(
                "momentum shift needs {MIN_DAYS} days, have {}",
                directions.len()
            );
            return ScoreOutcome::InsufficientData;
        }

        match Self::sign_change_rate(&directions) {
            Some(rate) => ScoreOutcome::Computed(
                (rate * RATE_SCALE).min(Component::MomentumShift.max_score()),
            ),
            None => ScoreOutcome::InsufficientData,
        }
    }
}
