//! Cadence Runner - Synthetic Book Scoring
//!
//! Generates a book of synthetic clients and scores it with the
//! switch-probability engine:
//!
//! - **Synthetic**: seeded per-segment trade histories and features
//! - **Book**: concurrent scoring and week-over-week alerts
//!
//! ## Flow
//!
//! ```text
//!  ClientProfile ──► SyntheticClientGenerator ──► InMemoryDataSource
//!                                                        │
//!                                                        ▼
//!                               BookScorer (tokio blocking tasks)
//!                                                        │
//!                                                        ▼
//!                                     BookReport (scores + alerts)
//! ```

pub mod book;
pub mod error;
pub mod synthetic;

// Re-export main types
pub use book::{BookReport, BookScorer, ClientScore, DEFAULT_ALERT_HORIZON_DAYS};
pub use error::{RunnerError, RunnerResult};
pub use synthetic::{
    ClientProfile, Segment, SegmentSwitch, SyntheticClientGenerator, SyntheticConfig,
};

use cadence_core::Timestamp;
use cadence_ports::InMemoryDataSource;

/// Instruments assigned round-robin to demo clients
pub const DEMO_INSTRUMENTS: [&str; 4] = ["EURUSD", "USDJPY", "GBPUSD", "ES"];

/// Build a demo book of `count` clients
///
/// Segments and instruments are assigned round-robin; every third client
/// switches segment `switch_days` before the end of its history.
pub fn demo_profiles(count: usize, switch_days: u32) -> Vec<ClientProfile> {
    (0..count)
        .map(|i| {
            let segment = Segment::ALL[i % Segment::ALL.len()];
            let client_id = format!("CLIENT_{:03}", i + 1);
            let instrument = DEMO_INSTRUMENTS[i % DEMO_INSTRUMENTS.len()];
            let profile = ClientProfile::new(&client_id, segment, instrument);

            if i % 3 == 2 {
                let to = Segment::ALL[(i + 1) % Segment::ALL.len()];
                profile.switching_to(to, switch_days)
            } else {
                profile
            }
        })
        .collect()
}

/// Generate every profile into an in-memory source
pub fn populate(
    generator: &mut SyntheticClientGenerator,
    profiles: &[ClientProfile],
    as_of: Timestamp,
) -> InMemoryDataSource {
    let mut source = InMemoryDataSource::new();
    for profile in profiles {
        let record = generator.generate(profile, as_of);
        log::debug!(
            "{} ({}): {} trades",
            profile.client_id,
            profile.segment,
            record.trades.len()
        );
        source.insert(profile.client_id.clone(), record);
    }
    source
}
