//! Behavior Scorers
//!
//! Each scorer reads the daily history (and optionally the client's
//! features) and reports a tagged [`ScoreOutcome`]. Scorers never fail the
//! calculation: the engine maps anything other than `Computed` to the
//! component's nominal fallback.
//!
//! | Component | Max | Nominal |
//! |---|---|---|
//! | Pattern instability | 0.30 | 0.05 |
//! | Change point | 0.25 | 0.05 |
//! | Momentum shift | 0.20 | 0.05 |
//! | Flip acceleration | 0.15 | 0.05 |
//! | Feature drift | 0.10 | 0.00 |

mod change_point;
mod feature_drift;
mod flip_acceleration;
mod momentum_shift;
mod pattern_instability;

pub use change_point::{ChangePoint, ChangePointDetector, ShiftDirection, detect_change_point};
pub use feature_drift::FeatureDriftScorer;
pub use flip_acceleration::FlipAccelerationScorer;
pub use momentum_shift::MomentumShiftScorer;
pub use pattern_instability::PatternInstabilityScorer;

use cadence_core::FeatureSet;

use crate::behavior::BehaviorHistory;

/// Result of a single scorer
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// Statistic computed normally
    Computed(f64),
    /// Not enough history (or no feature set) to compute the statistic
    InsufficientData,
    /// Numeric edge case (zero variance, zero baseline, ...)
    ComputationError(String),
}

impl ScoreOutcome {
    pub fn is_computed(&self) -> bool {
        matches!(self, ScoreOutcome::Computed(_))
    }

    /// Final contribution for a component
    ///
    /// Computed values are clamped into `[0, max]`; everything else,
    /// including a non-finite computed value, becomes `fallback`.
    pub fn resolve(&self, fallback: f64, max: f64) -> f64 {
        match self {
            ScoreOutcome::Computed(value) if value.is_finite() => value.clamp(0.0, max),
            _ => fallback,
        }
    }
}

/// The five signals combined into a switch probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    PatternInstability,
    ChangePoint,
    MomentumShift,
    FlipAcceleration,
    FeatureDrift,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::PatternInstability,
        Component::ChangePoint,
        Component::MomentumShift,
        Component::FlipAcceleration,
        Component::FeatureDrift,
    ];

    /// Upper bound of the component's contribution
    pub fn max_score(&self) -> f64 {
        match self {
            Component::PatternInstability => 0.30,
            Component::ChangePoint => 0.25,
            Component::MomentumShift => 0.20,
            Component::FlipAcceleration => 0.15,
            Component::FeatureDrift => 0.10,
        }
    }

    /// Contribution used when the statistic cannot be computed
    pub fn nominal(&self) -> f64 {
        match self {
            Component::FeatureDrift => 0.0,
            _ => 0.05,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Component::PatternInstability => "pattern_instability",
            Component::ChangePoint => "change_point",
            Component::MomentumShift => "momentum_shift",
            Component::FlipAcceleration => "flip_acceleration",
            Component::FeatureDrift => "feature_drift",
        }
    }
}

/// Everything a scorer may read
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub history: &'a BehaviorHistory,
    pub features: Option<&'a FeatureSet>,
}

/// Scorer interface
///
/// Implementations are stateless between calls and must be thread-safe.
pub trait BehaviorScorer: Send + Sync {
    /// Which component this scorer produces
    fn component(&self) -> Component;

    /// Score the input
    fn score(&self, input: &ScoringInput<'_>) -> ScoreOutcome;

    /// Get the scorer name for logging/debugging
    fn name(&self) -> &str {
        self.component().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantScorer(f64);

    impl BehaviorScorer for ConstantScorer {
        fn component(&self) -> Component {
            Component::MomentumShift
        }

        fn score(&self, _input: &ScoringInput<'_>) -> ScoreOutcome {
            ScoreOutcome::Computed(self.0)
        }
    }

    #[test]
    fn test_trait_object() {
        let scorer: Box<dyn BehaviorScorer> = Box::new(ConstantScorer(0.12));
        let history = BehaviorHistory::from_buckets(Vec::new());
        let input = ScoringInput {
            history: &history,
            features: None,
        };
        assert_eq!(scorer.name(), "momentum_shift");
        assert_eq!(scorer.score(&input), ScoreOutcome::Computed(0.12));
    }

    #[test]
    fn test_resolve_maps_failures_to_fallback() {
        assert_eq!(ScoreOutcome::InsufficientData.resolve(0.05, 0.30), 0.05);
        assert_eq!(
            ScoreOutcome::ComputationError("zero variance".into()).resolve(0.05, 0.30),
            0.05
        );
        assert_eq!(ScoreOutcome::Computed(f64::NAN).resolve(0.05, 0.30), 0.05);
    }

    #[test]
    fn test_resolve_clamps_computed() {
        assert_eq!(ScoreOutcome::Computed(0.9).resolve(0.05, 0.30), 0.30);
        assert_eq!(ScoreOutcome::Computed(-0.1).resolve(0.05, 0.30), 0.0);
        assert_eq!(ScoreOutcome::Computed(0.12).resolve(0.05, 0.30), 0.12);
    }

    #[test]
    fn test_component_bounds() {
        let total_max: f64 = Component::ALL.iter().map(Component::max_score).sum();
        assert!((total_max - 1.0).abs() < 1e-9);
        for component in Component::ALL {
            assert!(component.nominal() <= component.max_score());
        }
    }
}
