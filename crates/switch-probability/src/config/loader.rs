use std::path::Path;

use super::types::SwitchConfig;
use crate::error::{Error, Result};
use crate::result::{MAX_SWITCH_PROB, MIN_SWITCH_PROB};
use crate::scorers::Component;

/// Load engine configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SwitchConfig> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<SwitchConfig> {
    let config: SwitchConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<SwitchConfig> {
    let default_config = include_str!("switch_config.json");
    load_config_from_str(default_config)
}

impl SwitchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SWITCH_PROB..=MAX_SWITCH_PROB).contains(&self.baseline_prob) {
            return Err(invalid(format!(
                "baseline_prob {} outside [{MIN_SWITCH_PROB}, {MAX_SWITCH_PROB}]",
                self.baseline_prob
            )));
        }
        if self.lookback_days == 0 {
            return Err(invalid("lookback_days must be positive"));
        }
        if self.rolling_window_days < 2 {
            return Err(invalid("rolling_window_days must be at least 2"));
        }

        let cp = &self.change_point;
        if cp.min_days < 2 {
            return Err(invalid("change_point.min_days must be at least 2"));
        }
        if cp.drift_sigmas < 0.0 || cp.threshold_sigmas <= 0.0 {
            return Err(invalid("change_point sigmas must be positive"));
        }
        let cp_max = Component::ChangePoint.max_score();
        if !in_score_range(cp.stale_score, cp_max) {
            return Err(invalid("change_point.stale_score out of range"));
        }
        let mut previous: Option<(usize, f64)> = None;
        for tier in &cp.recency_tiers {
            if !in_score_range(tier.score, cp_max) {
                return Err(invalid(format!(
                    "recency tier score {} exceeds {cp_max}",
                    tier.score
                )));
            }
            if let Some((age, score)) = previous {
                if tier.max_age_days <= age || tier.score > score {
                    return Err(invalid(
                        "recency tiers must have ascending ages and non-increasing scores",
                    ));
                }
            }
            previous = Some((tier.max_age_days, tier.score));
        }
        if previous.is_some_and(|(_, score)| cp.stale_score > score) {
            return Err(invalid("change_point.stale_score exceeds the oldest tier"));
        }

        let fa = &self.flip_acceleration;
        if fa.recent_days == 0 || fa.min_days <= fa.recent_days {
            return Err(invalid(
                "flip_acceleration.min_days must exceed recent_days, which must be positive",
            ));
        }
        let fa_max = Component::FlipAcceleration.max_score();
        if !in_score_range(fa.decelerating_score, fa_max) {
            return Err(invalid("flip_acceleration.decelerating_score out of range"));
        }
        let mut previous: Option<(f64, f64)> = None;
        for tier in &fa.tiers {
            if !in_score_range(tier.score, fa_max) {
                return Err(invalid(format!(
                    "acceleration tier score {} exceeds {fa_max}",
                    tier.score
                )));
            }
            if let Some((ratio, score)) = previous {
                if tier.min_ratio >= ratio || tier.score > score {
                    return Err(invalid(
                        "acceleration tiers must have descending ratios and non-increasing scores",
                    ));
                }
            }
            previous = Some((tier.min_ratio, tier.score));
        }

        let fd = &self.feature_drift;
        for (name, rule) in [
            ("momentum_beta", fd.momentum_beta),
            ("holding_period", fd.holding_period),
            ("aggressiveness", fd.aggressiveness),
        ] {
            if rule.low > rule.high || rule.weight < 0.0 {
                return Err(invalid(format!("feature_drift.{name} is malformed")));
            }
        }

        if self.alerts.min_delta <= 0.0 {
            return Err(invalid("alerts.min_delta must be positive"));
        }

        Ok(())
    }
}

fn in_score_range(score: f64, max: f64) -> bool {
    (0.0..=max).contains(&score)
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidConfig(reason.into())
}
