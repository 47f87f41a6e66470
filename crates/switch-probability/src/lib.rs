//! Cadence Switch Probability
//!
//! Estimates how likely a trading client is to change their dominant
//! strategy within the next 14 days, from recent executions and optional
//! pre-computed behavioral features.
//!
//! ## Pipeline
//!
//! ```text
//!  Trades ──► Daily Behavior Aggregator ──► daily buckets
//!                                              │
//!        ┌───────────────┬──────────────┬──────┴────────┬────────────────┐
//!        ▼               ▼              ▼               ▼                ▼
//!  Pattern         Change-Point    Momentum       Flip             Feature Drift
//!  Instability     (CUSUM)         Shift          Acceleration     (+ FeatureSet)
//!  0.00-0.30       0.00-0.25       0.00-0.20      0.00-0.15        0.00-0.10
//!        └───────────────┴──────────────┴──────┬────────┴────────────────┘
//!                                              ▼
//!                        baseline + Σ scores, clamped to [0.15, 0.85]
//!                                              ▼
//!                                 SwitchProbabilityResult
//! ```
//!
//! Every call is pure and deterministic. Sparse histories fall back to
//! documented nominal scores instead of failing; only malformed trades are
//! rejected.

pub mod alert;
pub mod behavior;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod reasoning;
pub mod result;
pub mod scorers;
pub mod stats;

// Re-export main types
pub use alert::{AlertPolicy, AlertReason, SwitchAlert};
pub use behavior::{Aggregation, BehaviorHistory, DailyBehaviorBucket};
pub use client::compute_switch_probability;
pub use config::{SwitchConfig, load_config, load_config_from_str, load_default_config};
pub use engine::SwitchProbabilityEngine;
pub use error::{Error, Result};
pub use result::{
    ComponentScores, MAX_SWITCH_PROB, MIN_SWITCH_PROB, RiskLevel, SwitchProbabilityResult,
};
pub use scorers::{BehaviorScorer, Component, ScoreOutcome, ScoringInput};
