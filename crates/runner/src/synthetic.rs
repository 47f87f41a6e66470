//! Synthetic Client Histories
//!
//! Generates plausible trade tapes for demo books and tests. Each client
//! trades one instrument against a random-walk daily close, following the
//! rules of its segment:
//!
//! - **Trend follower**: buys a rising 5-day trend, exits on a falling one
//! - **Mean reverter**: fades 20-day moving-average deviations both ways
//! - **Hedger**: a handful of large, long-held positions, mostly short
//! - **Trend setter**: anticipates reversals, aggressive entries
//!
//! A profile may carry a late segment switch, which is what the engine is
//! supposed to notice.

use std::fmt;

use cadence_core::{FeatureSet, OrderType, PositionSnapshot, Side, Timestamp, TradeRecord};
use cadence_ports::ClientRecord;
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Behavioral archetype of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    TrendFollower,
    MeanReverter,
    Hedger,
    TrendSetter,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::TrendFollower,
        Segment::MeanReverter,
        Segment::Hedger,
        Segment::TrendSetter,
    ];

    /// Share of entries sent as market orders
    fn market_order_share(&self) -> f64 {
        match self {
            Segment::TrendFollower => 0.7,
            Segment::TrendSetter => 0.8,
            Segment::MeanReverter | Segment::Hedger => 0.0,
        }
    }

    /// Entry size range (units)
    fn size_range(&self) -> (i64, i64) {
        match self {
            Segment::TrendFollower => (50_000, 150_000),
            Segment::MeanReverter => (30_000, 100_000),
            Segment::Hedger => (100_000, 300_000),
            Segment::TrendSetter => (80_000, 200_000),
        }
    }

    /// Typical range of flow beta to 20-day returns
    fn momentum_beta_range(&self) -> (f64, f64) {
        match self {
            Segment::TrendFollower => (0.5, 0.95),
            Segment::MeanReverter => (-0.7, -0.2),
            Segment::Hedger => (-0.1, 0.1),
            Segment::TrendSetter => (0.2, 0.5),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Segment::TrendFollower => "Trend Follower",
            Segment::MeanReverter => "Mean Reverter",
            Segment::Hedger => "Hedger",
            Segment::TrendSetter => "Trend Setter",
        };
        f.write_str(name)
    }
}

/// A late change of segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentSwitch {
    pub to: Segment,
    /// Trading days before the end of the tape at which the switch happens
    pub days_before_end: u32,
}

/// Who to generate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub client_id: String,
    pub segment: Segment,
    pub instrument: String,
    #[serde(default)]
    pub switch: Option<SegmentSwitch>,
}

impl ClientProfile {
    pub fn new(client_id: &str, segment: Segment, instrument: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            segment,
            instrument: instrument.to_string(),
            switch: None,
        }
    }

    /// Builder-style late segment switch
    pub fn switching_to(mut self, to: Segment, days_before_end: u32) -> Self {
        self.switch = Some(SegmentSwitch {
            to,
            days_before_end,
        });
        self
    }

    /// Segment in force on `day` of a `days`-long tape
    pub fn segment_on(&self, day: usize, days: usize) -> Segment {
        match self.switch {
            Some(switch) if day + switch.days_before_end as usize >= days => switch.to,
            _ => self.segment,
        }
    }
}

/// Configuration for history generation
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Length of the tape in days
    pub days: u32,
    /// Starting close of every instrument
    pub initial_price: f64,
    /// Daily return volatility of the close (e.g. 0.01 = 1%)
    pub price_volatility: f64,
    /// Relative slippage applied to fills
    pub slippage: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            days: 90,
            initial_price: 1.10,
            price_volatility: 0.008,
            slippage: 0.0005,
        }
    }
}

/// Seeded generator of client histories
pub struct SyntheticClientGenerator {
    config: SyntheticConfig,
    rng: StdRng,
}

impl SyntheticClientGenerator {
    /// Create with a specific seed for reproducible books
    pub fn with_seed(config: SyntheticConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a full client record ending at `as_of`
    pub fn generate(&mut self, profile: &ClientProfile, as_of: Timestamp) -> ClientRecord {
        let closes = self.price_path();
        let days = closes.len();
        let start = as_of - Duration::days(i64::from(self.config.days));

        let mut tape = Tape::new(&profile.instrument);
        for day in 0..days {
            let segment = profile.segment_on(day, days);
            let timestamp = start
                + Duration::days(day as i64)
                + Duration::hours(8)
                + Duration::minutes(self.rng.gen_range(0..600));
            let close = closes[day];

            if let Some(target) = self.target_position(segment, &closes, day, &tape) {
                self.rebalance(&mut tape, segment, target, day, timestamp, close);
            }
        }

        let features = self.features(profile, &tape);
        let positions =
            PositionSnapshot::new(as_of).with_exposure(&profile.instrument, tape.position);

        ClientRecord {
            trades: tape.trades,
            positions: Some(positions),
            features: Some(features),
        }
    }

    /// Daily closes following a multiplicative random walk
    fn price_path(&mut self) -> Vec<f64> {
        let mut price = self.config.initial_price;
        (0..self.config.days)
            .map(|_| {
                let shock: f64 = self.rng.gen_range(-1.0..1.0);
                price *= 1.0 + self.config.price_volatility * shock;
                price
            })
            .collect()
    }

    /// Position the segment wants after `day`, `None` to stay put
    fn target_position(
        &mut self,
        segment: Segment,
        closes: &[f64],
        day: usize,
        tape: &Tape,
    ) -> Option<Decimal> {
        let position = tape.position;
        let held_days = tape.held_days(day);

        match segment {
            Segment::TrendFollower => {
                let trend = mean_return(closes, day, 5)?;
                if trend > 0.001 && position <= Decimal::ZERO {
                    Some(self.entry_size(segment))
                } else if trend < -0.001 && position > Decimal::ZERO && held_days >= 2 {
                    Some(Decimal::ZERO)
                } else {
                    None
                }
            }
            Segment::MeanReverter => {
                let deviation = ma_deviation(closes, day, 20)?;
                if deviation < -0.01 && position <= Decimal::ZERO {
                    Some(self.entry_size(segment))
                } else if deviation > 0.01
                    && (position.is_zero() || (position > Decimal::ZERO && held_days >= 1))
                {
                    Some(-self.entry_size(segment))
                } else {
                    None
                }
            }
            Segment::Hedger => {
                if position.is_zero() {
                    // Roughly ten entries over a quarter
                    if self.rng.gen_bool(0.11) {
                        let size = self.entry_size(segment);
                        Some(if self.rng.gen_bool(0.7) { -size } else { size })
                    } else {
                        None
                    }
                } else if held_days >= 30 {
                    Some(Decimal::ZERO)
                } else {
                    None
                }
            }
            Segment::TrendSetter => {
                let current = mean_return(closes, day, 1)?;
                let ahead = forward_return(closes, day, 5);
                if current < -0.005
                    && ahead.is_some_and(|r| r > 0.002)
                    && position <= Decimal::ZERO
                {
                    Some(self.entry_size(segment))
                } else if position > Decimal::ZERO && held_days >= 5 && current > 0.003 {
                    Some(Decimal::ZERO)
                } else {
                    None
                }
            }
        }
    }

    fn entry_size(&mut self, segment: Segment) -> Decimal {
        let (low, high) = segment.size_range();
        Decimal::from(self.rng.gen_range(low..high))
    }

    /// Trade from the current position to `target`
    fn rebalance(
        &mut self,
        tape: &mut Tape,
        segment: Segment,
        target: Decimal,
        day: usize,
        timestamp: Timestamp,
        close: f64,
    ) {
        let delta = target - tape.position;
        if delta.is_zero() {
            return;
        }

        let opening = !target.is_zero();
        let order_type = if opening && self.rng.gen_bool(segment.market_order_share()) {
            OrderType::Market
        } else {
            OrderType::Limit
        };
        let fill = close * (1.0 + self.rng.gen_range(-self.config.slippage..=self.config.slippage));
        let Some(price) = Decimal::from_f64_retain(fill) else {
            return;
        };
        let side = if delta > Decimal::ZERO { Side::Buy } else { Side::Sell };

        let trade = TradeRecord::new(
            timestamp,
            tape.instrument.as_str(),
            side,
            delta.abs(),
            price.round_dp(5),
        )
        .with_order_type(order_type);
        tape.record(trade, target, day);
    }

    /// Behavioral features derived from the generated tape
    fn features(&mut self, profile: &ClientProfile, tape: &Tape) -> FeatureSet {
        let (low, high) = profile
            .segment_on(self.config.days as usize, self.config.days as usize)
            .momentum_beta_range();
        let trades = tape.trades.len();
        let aggressive = tape
            .trades
            .iter()
            .filter(|t| t.order_type.is_aggressive())
            .count();

        let mut features = FeatureSet {
            momentum_beta_20d: Some(self.rng.gen_range(low..high)),
            holding_period_avg: tape.average_holding_days(),
            turnover: Some(trades as f64 / f64::from(self.config.days.max(1))),
            aggressiveness: (trades > 0).then(|| aggressive as f64 / trades as f64),
            ..Default::default()
        };
        if !tape.position.is_zero() {
            features
                .exposure_concentration
                .insert(profile.instrument.clone(), 1.0);
        }
        features
    }
}

/// Running state of one client's generated trades
struct Tape {
    instrument: String,
    trades: Vec<TradeRecord>,
    position: Decimal,
    /// Day index on which the current position was opened
    opened_on: Option<usize>,
    /// Completed holding periods in days
    holds: Vec<i64>,
}

impl Tape {
    fn new(instrument: &str) -> Self {
        Self {
            instrument: instrument.to_string(),
            trades: Vec::new(),
            position: Decimal::ZERO,
            opened_on: None,
            holds: Vec::new(),
        }
    }

    fn held_days(&self, day: usize) -> usize {
        self.opened_on.map_or(0, |opened| day.saturating_sub(opened))
    }

    fn record(&mut self, trade: TradeRecord, target: Decimal, day: usize) {
        if let Some(opened) = self.opened_on.take() {
            self.holds.push(day.saturating_sub(opened) as i64);
        }
        if !target.is_zero() {
            self.opened_on = Some(day);
        }

        self.position = target;
        self.trades.push(trade);
    }

    fn average_holding_days(&self) -> Option<f64> {
        if self.holds.is_empty() {
            return None;
        }
        let total: i64 = self.holds.iter().sum();
        Some(total as f64 / self.holds.len() as f64)
    }
}

/// Mean simple return over the `window` days ending at `day`
fn mean_return(closes: &[f64], day: usize, window: usize) -> Option<f64> {
    if day < window {
        return None;
    }
    let sum: f64 = (day + 1 - window..=day)
        .map(|i| closes[i] / closes[i - 1] - 1.0)
        .sum();
    Some(sum / window as f64)
}

/// Relative distance of the close from its `window`-day moving average
fn ma_deviation(closes: &[f64], day: usize, window: usize) -> Option<f64> {
    if day + 1 < window {
        return None;
    }
    let ma = closes[day + 1 - window..=day].iter().sum::<f64>() / window as f64;
    Some((closes[day] - ma) / ma)
}

/// Simple return from `day` to `day + horizon`
fn forward_return(closes: &[f64], day: usize, horizon: usize) -> Option<f64> {
    let ahead = closes.get(day + horizon)?;
    Some(ahead / closes[day] - 1.0)
}
