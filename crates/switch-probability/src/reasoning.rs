//! Natural-language explanation of a switch probability
//!
//! Deterministic: the same scores always yield the same text.

use crate::result::{ComponentScores, RiskLevel};

/// Build the explanation for a set of component scores
///
/// Format: `"<assessment>. Factors: <clause>, <clause>."`
pub fn explain(scores: &ComponentScores, switch_prob: f64) -> String {
    let mut factors = Vec::new();

    if scores.pattern_instability > 0.15 {
        factors.push(format!(
            "High pattern instability ({:.2})",
            scores.pattern_instability
        ));
    } else if scores.pattern_instability > 0.10 {
        factors.push(format!(
            "Moderate pattern variance ({:.2})",
            scores.pattern_instability
        ));
    }

    if scores.change_point > 0.15 {
        factors.push(format!(
            "Recent regime change detected ({:.2})",
            scores.change_point
        ));
    } else if scores.change_point > 0.10 {
        factors.push(format!("Possible regime shift ({:.2})", scores.change_point));
    }

    if scores.momentum_shift > 0.10 {
        factors.push(format!(
            "Frequent direction changes ({:.2})",
            scores.momentum_shift
        ));
    }

    if scores.flip_acceleration > 0.10 {
        factors.push(format!(
            "Accelerating position flips ({:.2})",
            scores.flip_acceleration
        ));
    }

    if scores.feature_drift > 0.05 {
        factors.push(format!(
            "Significant feature drift ({:.2})",
            scores.feature_drift
        ));
    }

    if factors.is_empty() {
        factors.push("Stable behavior patterns".to_string());
    }

    format!(
        "{}. Factors: {}.",
        RiskLevel::from_probability(switch_prob).assessment(),
        factors.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_explanation() {
        let text = explain(&ComponentScores::default(), 0.30);
        assert_eq!(
            text,
            "LOW risk of strategy switch. Factors: Stable behavior patterns."
        );
    }

    #[test]
    fn test_factor_order_and_formatting() {
        let scores = ComponentScores {
            pattern_instability: 0.12,
            change_point: 0.25,
            momentum_shift: 0.15,
            flip_acceleration: 0.15,
            feature_drift: 0.07,
        };
        let text = explain(&scores, 0.85);
        assert_eq!(
            text,
            "HIGH risk of strategy switch. Factors: Moderate pattern variance (0.12), \
             Recent regime change detected (0.25), Frequent direction changes (0.15), \
             Accelerating position flips (0.15), Significant feature drift (0.07)."
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let scores = ComponentScores {
            pattern_instability: 0.10,
            change_point: 0.10,
            momentum_shift: 0.10,
            flip_acceleration: 0.10,
            feature_drift: 0.05,
        };
        assert!(explain(&scores, 0.50).ends_with("Factors: Stable behavior patterns."));
    }

    #[test]
    fn test_possible_regime_shift() {
        let scores = ComponentScores {
            change_point: 0.15,
            ..Default::default()
        };
        let text = explain(&scores, 0.45);
        assert!(text.starts_with("MODERATE risk of strategy switch."));
        assert!(text.contains("Possible regime shift (0.15)"));
    }
}
