//! Change-Point Detection
//!
//! Two-sided CUSUM over the daily flip-count series:
//!
//! ```text
//! S+_t = max(0, S+_{t-1} + x_t - mu - k*sigma)   (upward shift)
//! S-_t = min(0, S-_{t-1} + x_t - mu + k*sigma)   (downward shift)
//! ```
//!
//! The first day where either statistic exceeds `h*sigma` is the break.
//! Recent breaks are strong switch signals; the score decays through the
//! configured recency tiers as the break ages. A history with no break
//! scores the component's nominal value.

use log::debug;

use super::{BehaviorScorer, Component, ScoreOutcome, ScoringInput};
use crate::config::ChangePointConfig;
use crate::stats;

const MIN_STD_DEV: f64 = 1e-6;

/// Direction of a detected mean shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Up,
    Down,
}

/// A detected regime break
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangePoint {
    /// Index of the flagged day in the series
    pub index: usize,
    /// Days from the flagged day to the end of the series (1 = last day)
    pub age_days: usize,
    pub direction: ShiftDirection,
}

/// Run the CUSUM test and return the first break, if any
///
/// Returns `None` when the series has fewer than two points or no
/// variance, as well as when nothing crosses the threshold.
pub fn detect_change_point(
    series: &[f64],
    drift_sigmas: f64,
    threshold_sigmas: f64,
) -> Option<ChangePoint> {
    let mean = stats::mean(series)?;
    let std_dev = stats::std_dev(series)?;
    if std_dev < MIN_STD_DEV {
        return None;
    }

    let allowance = drift_sigmas * std_dev;
    let threshold = threshold_sigmas * std_dev;
    let mut cusum_pos = 0.0_f64;
    let mut cusum_neg = 0.0_f64;

    for (index, &value) in series.iter().enumerate() {
        cusum_pos = (cusum_pos + value - mean - allowance).max(0.0);
        cusum_neg = (cusum_neg + value - mean + allowance).min(0.0);

        let direction = if cusum_pos.abs() > threshold {
            Some(ShiftDirection::Up)
        } else if cusum_neg.abs() > threshold {
            Some(ShiftDirection::Down)
        } else {
            None
        };

        if let Some(direction) = direction {
            return Some(ChangePoint {
                index,
                age_days: series.len() - index,
                direction,
            });
        }
    }

    None
}

/// CUSUM-based regime break scorer
#[derive(Debug, Clone)]
pub struct ChangePointDetector {
    config: ChangePointConfig,
}

impl ChangePointDetector {
    pub fn new(config: ChangePointConfig) -> Self {
        Self { config }
    }
}

impl BehaviorScorer for ChangePointDetector {
    fn component(&self) -> Component {
        Component::ChangePoint
    }

    fn score(&self, input: &ScoringInput<'_>) -> ScoreOutcome {
        let flips = input.history.daily_flips();
        if flips.len() < self.config.min_days {
            debug!(
                "change point needs {} days, have {}",
                self.config.min_days,
                flips.len()
            );
            return ScoreOutcome::InsufficientData;
        }

        match stats::std_dev(&flips) {
            Some(std_dev) if std_dev >= MIN_STD_DEV => {}
            _ => return ScoreOutcome::ComputationError("flip series has no variance".into()),
        }

        match detect_change_point(
            &flips,
            self.config.drift_sigmas,
            self.config.threshold_sigmas,
        ) {
            Some(change) => {
                debug!(
                    "regime break {:?} detected {} days before end of history",
                    change.direction, change.age_days
                );
                ScoreOutcome::Computed(self.config.score_for_age(change.age_days))
            }
            None => ScoreOutcome::Computed(Component::ChangePoint.nominal()),
        }
    }
}
