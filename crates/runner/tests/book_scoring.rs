//! Integration test: synthetic book through the full scoring pipeline
//!
//! 1. Generate a seeded demo book
//! 2. Score it now and a week earlier on blocking tasks
//! 3. Check scores, alerts and the risk histogram

use std::sync::Arc;

use cadence_core::Timestamp;
use cadence_runner::{
    BookScorer, ClientProfile, DEFAULT_ALERT_HORIZON_DAYS, Segment, SyntheticClientGenerator,
    SyntheticConfig, demo_profiles, populate,
};
use cadence_switch::{MAX_SWITCH_PROB, MIN_SWITCH_PROB, SwitchProbabilityEngine};
use chrono::{TimeZone, Utc};

const SEED: u64 = 42;

fn as_of() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 28, 18, 0, 0).unwrap()
}

fn book_scorer(profiles: &[ClientProfile], seed: u64) -> BookScorer {
    let mut generator = SyntheticClientGenerator::with_seed(SyntheticConfig::default(), seed);
    let source = populate(&mut generator, profiles, as_of());
    BookScorer::new(Arc::new(SwitchProbabilityEngine::default()), Arc::new(source))
}

fn ids(profiles: &[ClientProfile]) -> Vec<String> {
    profiles.iter().map(|p| p.client_id.clone()).collect()
}

#[tokio::test]
async fn test_demo_book_scores_every_client() {
    let _ = env_logger::try_init();

    let profiles = demo_profiles(16, 6);
    let report = book_scorer(&profiles, SEED)
        .run(&ids(&profiles), as_of(), DEFAULT_ALERT_HORIZON_DAYS)
        .await
        .unwrap();

    assert_eq!(report.scores.len(), 16);
    for score in &report.scores {
        let prob = score.result.switch_prob;
        assert!(
            (MIN_SWITCH_PROB..=MAX_SWITCH_PROB).contains(&prob),
            "{}: {prob}",
            score.client_id
        );
        assert!(score.result.validate().is_ok());
    }
    assert_eq!(report.risk_counts.values().sum::<usize>(), 16);

    for alert in &report.alerts {
        assert!(alert.new_switch_prob > alert.old_switch_prob);
        assert_eq!(alert.timestamp, as_of());
    }
}

#[tokio::test]
async fn test_same_seed_same_report() {
    let _ = env_logger::try_init();

    let profiles = demo_profiles(8, 6);
    let first = book_scorer(&profiles, SEED)
        .run(&ids(&profiles), as_of(), DEFAULT_ALERT_HORIZON_DAYS)
        .await
        .unwrap();
    let second = book_scorer(&profiles, SEED)
        .run(&ids(&profiles), as_of(), DEFAULT_ALERT_HORIZON_DAYS)
        .await
        .unwrap();

    assert_eq!(first.scores, second.scores);
    assert_eq!(first.alerts, second.alerts);
}

#[tokio::test]
async fn test_every_segment_produces_history() {
    let _ = env_logger::try_init();

    let profiles: Vec<ClientProfile> = Segment::ALL
        .iter()
        .enumerate()
        .map(|(i, &segment)| ClientProfile::new(&format!("SEG_{i}"), segment, "EURUSD"))
        .collect();
    let scores = book_scorer(&profiles, SEED)
        .score_all(&ids(&profiles), as_of())
        .await
        .unwrap();

    assert_eq!(scores.len(), Segment::ALL.len());
    // Active segments trade often enough to reach the full scoring path
    let trend_follower = &scores[0].result;
    assert!(!trend_follower.reasoning.starts_with("Using baseline probability"));
}

#[tokio::test]
async fn test_report_serializes() {
    let profiles = demo_profiles(3, 6);
    let report = book_scorer(&profiles, SEED)
        .run(&ids(&profiles), as_of(), DEFAULT_ALERT_HORIZON_DAYS)
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["scores"].as_array().map(Vec::len), Some(3));
    assert!(json["scores"][0]["switch_prob"].is_f64());
    assert!(json["scores"][0]["risk_level"].is_string());
    assert!(json["alerts"].is_array());
}
