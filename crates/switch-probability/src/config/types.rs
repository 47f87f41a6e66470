use serde::{Deserialize, Serialize};

use crate::alert::AlertPolicy;

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// History window the client entry point fetches (days)
    pub lookback_days: u32,
    /// Rolling-variance window for pattern instability (days)
    pub rolling_window_days: usize,
    /// Prior switch probability before any signal is added
    pub baseline_prob: f64,
    pub change_point: ChangePointConfig,
    pub flip_acceleration: FlipAccelerationConfig,
    pub feature_drift: FeatureDriftConfig,
    pub alerts: AlertPolicy,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            rolling_window_days: 14,
            baseline_prob: 0.30,
            change_point: ChangePointConfig::default(),
            flip_acceleration: FlipAccelerationConfig::default(),
            feature_drift: FeatureDriftConfig::default(),
            alerts: AlertPolicy::default(),
        }
    }
}

/// CUSUM parameters and recency scoring for regime breaks
///
/// Threshold and tiers are empirical and should be recalibrated against
/// realised switches before absolute probabilities are trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangePointConfig {
    /// Minimum days of flip history before running the test
    pub min_days: usize,
    /// Allowance subtracted per step, in standard deviations (CUSUM k)
    pub drift_sigmas: f64,
    /// Decision threshold, in standard deviations (CUSUM h)
    pub threshold_sigmas: f64,
    /// Age-ordered score tiers
    pub recency_tiers: Vec<RecencyTier>,
    /// Score for breaks older than every tier, and when no break is found
    pub stale_score: f64,
}

impl Default for ChangePointConfig {
    fn default() -> Self {
        Self {
            min_days: 20,
            drift_sigmas: 0.5,
            threshold_sigmas: 3.0,
            recency_tiers: vec![
                RecencyTier::new(14, 0.25),
                RecencyTier::new(30, 0.15),
                RecencyTier::new(60, 0.10),
            ],
            stale_score: 0.05,
        }
    }
}

impl ChangePointConfig {
    /// Score for a break detected `age_days` before the end of the series
    pub fn score_for_age(&self, age_days: usize) -> f64 {
        self.recency_tiers
            .iter()
            .find(|tier| age_days <= tier.max_age_days)
            .map(|tier| tier.score)
            .unwrap_or(self.stale_score)
    }
}

/// Breaks at most `max_age_days` old score `score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecencyTier {
    pub max_age_days: usize,
    pub score: f64,
}

impl RecencyTier {
    pub fn new(max_age_days: usize, score: f64) -> Self {
        Self {
            max_age_days,
            score,
        }
    }
}

/// Recent-vs-baseline flip frequency tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipAccelerationConfig {
    /// Minimum days of flip history
    pub min_days: usize,
    /// Trailing days treated as "recent"
    pub recent_days: usize,
    /// Tiers in descending ratio order; first ratio strictly exceeded wins
    pub tiers: Vec<AccelerationTier>,
    /// Score when the ratio exceeds no tier (flipping is steady or slowing)
    pub decelerating_score: f64,
}

impl Default for FlipAccelerationConfig {
    fn default() -> Self {
        Self {
            min_days: 21,
            recent_days: 7,
            tiers: vec![
                AccelerationTier::new(1.5, 0.15),
                AccelerationTier::new(1.2, 0.10),
                AccelerationTier::new(1.0, 0.05),
            ],
            decelerating_score: 0.02,
        }
    }
}

impl FlipAccelerationConfig {
    /// Score for a recent/baseline flip-rate ratio
    pub fn score_for_ratio(&self, ratio: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| ratio > tier.min_ratio)
            .map(|tier| tier.score)
            .unwrap_or(self.decelerating_score)
    }
}

/// Ratios strictly above `min_ratio` score `score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerationTier {
    pub min_ratio: f64,
    pub score: f64,
}

impl AccelerationTier {
    pub fn new(min_ratio: f64, score: f64) -> Self {
        Self { min_ratio, score }
    }
}

/// "Normal" ranges for externally computed features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDriftConfig {
    /// Applied to |momentum_beta_20d|
    pub momentum_beta: DriftRule,
    pub holding_period: DriftRule,
    pub aggressiveness: DriftRule,
}

impl Default for FeatureDriftConfig {
    fn default() -> Self {
        Self {
            momentum_beta: DriftRule::new(0.2, 0.9, 0.03),
            holding_period: DriftRule::new(2.0, 60.0, 0.03),
            aggressiveness: DriftRule::new(0.2, 0.9, 0.04),
        }
    }
}

/// Adds `weight` when a value falls outside `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftRule {
    pub low: f64,
    pub high: f64,
    pub weight: f64,
}

impl DriftRule {
    pub fn new(low: f64, high: f64, weight: f64) -> Self {
        Self { low, high, weight }
    }

    /// Is the value outside the normal range?
    pub fn is_extreme(&self, value: f64) -> bool {
        value < self.low || value > self.high
    }
}
