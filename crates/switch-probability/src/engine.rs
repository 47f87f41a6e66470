//! Switch-Probability Engine
//!
//! Pure, synchronous computation: trades in, [`SwitchProbabilityResult`] out.
//! The engine holds only immutable configuration, so one instance can be
//! shared across threads and called for many clients at once.

use cadence_core::{FeatureSet, PositionSnapshot, TradeRecord};
use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::behavior::{Aggregation, BehaviorHistory};
use crate::config::SwitchConfig;
use crate::error::{Error, Result};
use crate::result::{ComponentScores, SwitchProbabilityResult};
use crate::scorers::{
    BehaviorScorer, ChangePointDetector, FeatureDriftScorer, FlipAccelerationScorer,
    MomentumShiftScorer, PatternInstabilityScorer, ScoringInput,
};

/// Multi-signal switch-probability estimator
pub struct SwitchProbabilityEngine {
    config: SwitchConfig,
    scorers: Vec<Box<dyn BehaviorScorer>>,
}

impl SwitchProbabilityEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: SwitchConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Switch probability engine initialized (lookback={}d, window={}d, baseline={:.2})",
            config.lookback_days, config.rolling_window_days, config.baseline_prob
        );

        Ok(Self::with_scorers(config))
    }

    fn with_scorers(config: SwitchConfig) -> Self {
        let scorers: Vec<Box<dyn BehaviorScorer>> = vec![
            Box::new(PatternInstabilityScorer::new(config.rolling_window_days)),
            Box::new(ChangePointDetector::new(config.change_point.clone())),
            Box::new(MomentumShiftScorer),
            Box::new(FlipAccelerationScorer::new(config.flip_acceleration.clone())),
            Box::new(FeatureDriftScorer::new(config.feature_drift)),
        ];
        Self { config, scorers }
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    /// Estimate the probability that a client switches strategy in 14 days
    ///
    /// Sparse or degenerate histories degrade to documented fallbacks; only
    /// malformed trades return an error.
    pub fn calculate(
        &self,
        client_id: &str,
        trades: &[TradeRecord],
        positions: Option<&PositionSnapshot>,
        features: Option<&FeatureSet>,
    ) -> Result<SwitchProbabilityResult> {
        info!("Computing switch probability for {client_id}");
        validate_trades(trades)?;

        if let Some(snapshot) = positions {
            debug!(
                "{client_id}: {} open positions ({} gross) as of {}",
                snapshot.open_instruments(),
                snapshot.gross_exposure(),
                snapshot.as_of
            );
        }

        let history = match BehaviorHistory::aggregate(trades)? {
            Aggregation::Buckets(history) => history,
            Aggregation::Insufficient { trades: 0 } => {
                warn!("No trades for {client_id}, using baseline");
                return Ok(SwitchProbabilityResult::baseline(
                    self.config.baseline_prob,
                    "No trading history",
                ));
            }
            Aggregation::Insufficient { trades } => {
                warn!("Only {trades} trade(s) for {client_id}, using baseline");
                let plural = if trades == 1 { "" } else { "s" };
                return Ok(SwitchProbabilityResult::baseline(
                    self.config.baseline_prob,
                    format!("Insufficient trading history ({trades} trade{plural})"),
                ));
            }
        };

        debug!(
            "{client_id}: {} trading days, {} position flips",
            history.len(),
            history.total_flips()
        );

        let input = ScoringInput {
            history: &history,
            features,
        };
        let mut scores = ComponentScores::default();
        for scorer in &self.scorers {
            let component = scorer.component();
            let outcome = scorer.score(&input);
            if !outcome.is_computed() {
                debug!(
                    "{client_id}: {} fell back to {:.2} ({outcome:?})",
                    scorer.name(),
                    component.nominal()
                );
            }
            scores.set(
                component,
                outcome.resolve(component.nominal(), component.max_score()),
            );
        }

        let result = SwitchProbabilityResult::combine(self.config.baseline_prob, scores);

        info!(
            "Switch prob for {client_id}: {:.2} (pattern={:.2}, cp={:.2}, momentum={:.2}, flip={:.2}, drift={:.2})",
            result.switch_prob,
            result.pattern_instability,
            result.change_point,
            result.momentum_shift,
            result.flip_acceleration,
            result.feature_drift
        );

        Ok(result)
    }
}

impl Default for SwitchProbabilityEngine {
    fn default() -> Self {
        Self::with_scorers(SwitchConfig::default())
    }
}

/// Reject trades that break the input contract
fn validate_trades(trades: &[TradeRecord]) -> Result<()> {
    for (index, trade) in trades.iter().enumerate() {
        let reason = if trade.instrument.trim().is_empty() {
            "empty instrument symbol".to_string()
        } else if trade.quantity <= Decimal::ZERO {
            format!("non-positive quantity {}", trade.quantity)
        } else if trade.price < Decimal::ZERO {
            format!("negative price {}", trade.price)
        } else {
            continue;
        };
        return Err(Error::InvalidTrade { index, reason });
    }
    Ok(())
}
