//! Switch-probability result
//!
//! The output contract handed back to callers. Field names match the
//! JSON consumed by downstream services.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reasoning;
use crate::scorers::Component;

/// Lower clamp for a computed switch probability
pub const MIN_SWITCH_PROB: f64 = 0.15;
/// Upper clamp for a computed switch probability
pub const MAX_SWITCH_PROB: f64 = 0.85;

/// Qualitative switch risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_probability(switch_prob: f64) -> Self {
        if switch_prob > 0.60 {
            RiskLevel::High
        } else if switch_prob > 0.40 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Headline used in reasoning strings
    pub fn assessment(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW risk of strategy switch",
            RiskLevel::Moderate => "MODERATE risk of strategy switch",
            RiskLevel::High => "HIGH risk of strategy switch",
        }
    }
}

/// Per-component contributions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub pattern_instability: f64,
    pub change_point: f64,
    pub momentum_shift: f64,
    pub flip_acceleration: f64,
    pub feature_drift: f64,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::PatternInstability => self.pattern_instability,
            Component::ChangePoint => self.change_point,
            Component::MomentumShift => self.momentum_shift,
            Component::FlipAcceleration => self.flip_acceleration,
            Component::FeatureDrift => self.feature_drift,
        }
    }

    pub fn set(&mut self, component: Component, value: f64) {
        match component {
            Component::PatternInstability => self.pattern_instability = value,
            Component::ChangePoint => self.change_point = value,
            Component::MomentumShift => self.momentum_shift = value,
            Component::FlipAcceleration => self.flip_acceleration = value,
            Component::FeatureDrift => self.feature_drift = value,
        }
    }

    /// Sum of all contributions
    pub fn total(&self) -> f64 {
        Component::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Final switch probability with its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchProbabilityResult {
    /// Probability of a strategy switch within 14 days
    pub switch_prob: f64,
    pub pattern_instability: f64,
    pub change_point: f64,
    pub momentum_shift: f64,
    pub flip_acceleration: f64,
    pub feature_drift: f64,
    pub reasoning: String,
}

impl SwitchProbabilityResult {
    /// Combine component scores onto the baseline
    ///
    /// The probability is clamped to `[MIN_SWITCH_PROB, MAX_SWITCH_PROB]` and
    /// rounded to 2 decimals; components are rounded to 3 decimals. The
    /// reasoning is written from the rounded values, so its risk headline
    /// always agrees with [`Self::risk_level`].
    pub fn combine(baseline_prob: f64, scores: ComponentScores) -> Self {
        let switch_prob = round_to(
            (baseline_prob + scores.total()).clamp(MIN_SWITCH_PROB, MAX_SWITCH_PROB),
            2,
        );
        let mut rounded = ComponentScores::default();
        for component in Component::ALL {
            rounded.set(component, round_to(scores.get(component), 3));
        }

        Self {
            switch_prob,
            pattern_instability: rounded.pattern_instability,
            change_point: rounded.change_point,
            momentum_shift: rounded.momentum_shift,
            flip_acceleration: rounded.flip_acceleration,
            feature_drift: rounded.feature_drift,
            reasoning: reasoning::explain(&rounded, switch_prob),
        }
    }

    /// Result used when no scoring could run
    pub fn baseline(baseline_prob: f64, cause: impl AsRef<str>) -> Self {
        Self {
            switch_prob: baseline_prob,
            pattern_instability: 0.0,
            change_point: 0.0,
            momentum_shift: 0.0,
            flip_acceleration: 0.0,
            feature_drift: 0.0,
            reasoning: format!("Using baseline probability. {}", cause.as_ref()),
        }
    }

    pub fn components(&self) -> ComponentScores {
        ComponentScores {
            pattern_instability: self.pattern_instability,
            change_point: self.change_point,
            momentum_shift: self.momentum_shift,
            flip_acceleration: self.flip_acceleration,
            feature_drift: self.feature_drift,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_probability(self.switch_prob)
    }

    /// Check the output contract before handing the result downstream
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.switch_prob) {
            return Err(Error::InvalidResult(format!(
                "switch_prob {} outside [0, 1]",
                self.switch_prob
            )));
        }
        let components = self.components();
        for component in Component::ALL {
            let value = components.get(component);
            if !(0.0..=component.max_score()).contains(&value) {
                return Err(Error::InvalidResult(format!(
                    "{} = {value} outside [0, {}]",
                    component.name(),
                    component.max_score()
                )));
            }
        }
        Ok(())
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
