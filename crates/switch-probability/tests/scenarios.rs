//! End-to-end scenarios for the switch-probability engine
//!
//! Each scenario builds a realistic trade tape, runs the full pipeline and
//! checks the headline number together with the component breakdown.

use cadence_core::{FeatureSet, Side, TradeRecord};
use cadence_switch::{RiskLevel, SwitchProbabilityEngine, SwitchProbabilityResult};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const INSTRUMENT: &str = "EURUSD";

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Tape whose day `d` contains exactly `flips[d]` position flips
///
/// Day 0 opens with a 1-lot buy. Every flip trade crosses the current
/// position to one lot the other way; zero-flip days add a lot in the
/// current direction.
fn flip_tape(flips: &[u32]) -> Vec<TradeRecord> {
    let mut trades = Vec::new();
    let mut position = Decimal::ZERO;

    for (d, &count) in flips.iter().enumerate() {
        let day = start() + Duration::days(d as i64);
        let mut minute = 0;
        let mut push = |side: Side, qty: Decimal, trades: &mut Vec<TradeRecord>| {
            minute += 1;
            trades.push(TradeRecord::new(
                day + Duration::minutes(minute),
                INSTRUMENT,
                side,
                qty,
                dec!(1.0850),
            ));
        };

        if d == 0 {
            push(Side::Buy, dec!(1), &mut trades);
            position = dec!(1);
        }
        if count == 0 && d > 0 {
            let side = if position.is_sign_negative() { Side::Sell } else { Side::Buy };
            push(side, dec!(1), &mut trades);
            position += side.sign();
        }
        for _ in 0..count {
            let side = if position.is_sign_negative() { Side::Buy } else { Side::Sell };
            push(side, position.abs() + dec!(1), &mut trades);
            position = side.sign();
        }
    }

    trades
}

/// One identical buy per day: no flips, constant volume
fn flat_tape(days: i64) -> Vec<TradeRecord> {
    (0..days)
        .map(|d| {
            TradeRecord::new(
                start() + Duration::days(d),
                INSTRUMENT,
                Side::Buy,
                dec!(10),
                dec!(1.0850),
            )
        })
        .collect()
}

fn calculate(trades: &[TradeRecord], features: Option<&FeatureSet>) -> SwitchProbabilityResult {
    SwitchProbabilityEngine::default()
        .calculate("SCENARIO", trades, None, features)
        .unwrap()
}

#[test]
fn test_no_history_is_baseline() {
    let _ = env_logger::try_init();

    let result = calculate(&[], None);
    assert_eq!(result.switch_prob, 0.30);
    assert_eq!(result.components().total(), 0.0);
    assert_eq!(result.risk_level(), RiskLevel::Low);
}

#[test]
fn test_single_trade_is_baseline() {
    let _ = env_logger::try_init();

    let result = calculate(&flat_tape(1), None);
    assert_eq!(result.switch_prob, 0.30);
    assert_eq!(result.pattern_instability, 0.0);
    assert_eq!(result.change_point, 0.0);
    assert_eq!(result.momentum_shift, 0.0);
    assert_eq!(result.flip_acceleration, 0.0);
    assert_eq!(result.feature_drift, 0.0);
    assert!(result.reasoning.starts_with("Using baseline probability."));
}

#[test]
fn test_flat_quarter_stays_near_floor() {
    let _ = env_logger::try_init();

    let result = calculate(&flat_tape(90), None);

    // Constant activity: no volatility, a single direction, no flips at all
    assert_eq!(result.pattern_instability, 0.0);
    assert!(result.momentum_shift < 0.01);
    assert_eq!(result.change_point, 0.05);
    assert_eq!(result.flip_acceleration, 0.05);
    assert_eq!(result.feature_drift, 0.0);

    // Degenerate change-point and acceleration series sit at their 0.05 nominals
    let nominal_floor = 0.10;
    assert!((result.switch_prob - (0.30 + nominal_floor)).abs() <= 0.05);
    assert_eq!(result.risk_level(), RiskLevel::Low);
}

#[test]
fn test_recent_flip_surge_is_high_risk() {
    let _ = env_logger::try_init();

    // Two flips a day for 85 days, then ten a day for the last five
    let mut flips = vec![2; 85];
    flips.extend([10; 5]);
    let result = calculate(&flip_tape(&flips), None);

    assert_eq!(result.change_point, 0.25);
    assert_eq!(result.flip_acceleration, 0.15);
    assert!(result.switch_prob > 0.50);
    assert!(result.switch_prob >= 0.70);
    assert_eq!(result.risk_level(), RiskLevel::High);
    assert!(result.reasoning.starts_with("HIGH risk of strategy switch"));
    assert!(result.reasoning.contains("Recent regime change detected"));
    assert!(result.reasoning.contains("Accelerating position flips"));
}

#[test]
fn test_extreme_momentum_beta_adds_drift() {
    let _ = env_logger::try_init();

    let features = FeatureSet {
        momentum_beta_20d: Some(0.95),
        ..Default::default()
    };
    let with = calculate(&flat_tape(90), Some(&features));
    let without = calculate(&flat_tape(90), None);

    assert_eq!(with.feature_drift, 0.03);
    assert!(with.switch_prob >= without.switch_prob);
}

#[test]
fn test_older_break_scores_no_higher() {
    let _ = env_logger::try_init();

    // Five-day burst placed progressively further from the end of the tape
    let scores: Vec<f64> = [85, 80, 70, 55, 40, 20]
        .iter()
        .map(|&burst_start| {
            let flips: Vec<u32> = (0..90)
                .map(|d| if (burst_start..burst_start + 5).contains(&d) { 10 } else { 2 })
                .collect();
            calculate(&flip_tape(&flips), None).change_point
        })
        .collect();

    assert_eq!(scores, vec![0.25, 0.25, 0.15, 0.10, 0.10, 0.05]);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_faster_recent_flipping_scores_no_lower() {
    let _ = env_logger::try_init();

    let scores: Vec<f64> = [0, 1, 2, 3, 4, 6, 10]
        .iter()
        .map(|&recent| {
            let mut flips = vec![2; 83];
            flips.extend(vec![recent; 7]);
            calculate(&flip_tape(&flips), None).flip_acceleration
        })
        .collect();

    assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{scores:?}");
    assert_eq!(scores.first(), Some(&0.02));
    assert_eq!(scores.last(), Some(&0.15));
}

#[test]
fn test_result_serializes_flat() {
    let mut flips = vec![2; 85];
    flips.extend([10; 5]);
    let result = calculate(&flip_tape(&flips), None);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["change_point"], 0.25);
    assert!(json["switch_prob"].is_f64());
    assert!(json["reasoning"].is_string());
}
