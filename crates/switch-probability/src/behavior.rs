//! Daily Behavior Aggregation
//!
//! Folds a client's executions into one bucket per UTC calendar day:
//! traded volume, distinct instruments, net signed quantity and the number
//! of position flips.
//!
//! A flip is any trade that changes the sign of the client's running
//! position in an instrument (long, flat or short). The first trade seen for
//! an instrument establishes the position and is never a flip.
//!
//! Trades are replayed in chronological order. Trades sharing a timestamp
//! keep their input order, so flip counts never depend on sort stability.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use cadence_core::TradeRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{Error, Result};

/// Aggregated behavior for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBehaviorBucket {
    pub date: NaiveDate,
    /// Sum of unsigned traded quantity
    pub volume: Decimal,
    /// Distinct instruments traded that day
    pub instruments: usize,
    /// Buys minus sells across all instruments
    pub net_quantity: Decimal,
    /// Position flips across all instruments
    pub flips: u32,
}

impl DailyBehaviorBucket {
    /// Directional bias of the day: +1 net buyer, -1 net seller, 0 flat
    pub fn direction(&self) -> i8 {
        sign(self.net_quantity)
    }
}

/// Outcome of aggregating a trade sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Enough trades to derive daily buckets
    Buckets(BehaviorHistory),
    /// Too few trades; downstream scoring cannot run
    Insufficient { trades: usize },
}

/// Chronological sequence of daily buckets
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorHistory {
    buckets: Vec<DailyBehaviorBucket>,
}

impl BehaviorHistory {
    /// Fewest trades that produce any bucket
    pub const MIN_TRADES: usize = 2;

    /// Aggregate trades into daily buckets
    ///
    /// Fails only when a running total leaves the `Decimal` range.
    pub fn aggregate(trades: &[TradeRecord]) -> Result<Aggregation> {
        if trades.len() < Self::MIN_TRADES {
            return Ok(Aggregation::Insufficient {
                trades: trades.len(),
            });
        }

        let mut order: Vec<usize> = (0..trades.len()).collect();
        order.sort_by_key(|&i| (trades[i].timestamp, i));

        let mut positions: HashMap<&str, Decimal> = HashMap::new();
        let mut days: BTreeMap<NaiveDate, DayAccumulator<'_>> = BTreeMap::new();

        for i in order {
            let trade = &trades[i];
            let signed = trade.signed_quantity();
            let day = days.entry(trade.trade_date()).or_default();

            day.volume = checked_add(day.volume, trade.quantity, i)?;
            day.net_quantity = checked_add(day.net_quantity, signed, i)?;
            day.instruments.insert(trade.instrument.as_str());

            match positions.get_mut(trade.instrument.as_str()) {
                Some(position) => {
                    let before = sign(*position);
                    *position = checked_add(*position, signed, i)?;
                    if sign(*position) != before {
                        day.flips += 1;
                    }
                }
                None => {
                    positions.insert(trade.instrument.as_str(), signed);
                }
            }
        }

        let buckets = days
            .into_iter()
            .map(|(date, day)| DailyBehaviorBucket {
                date,
                volume: day.volume,
                instruments: day.instruments.len(),
                net_quantity: day.net_quantity,
                flips: day.flips,
            })
            .collect();

        Ok(Aggregation::Buckets(Self { buckets }))
    }

    /// Build a history directly from buckets (sorted by date)
    pub fn from_buckets(mut buckets: Vec<DailyBehaviorBucket>) -> Self {
        buckets.sort_by_key(|b| b.date);
        Self { buckets }
    }

    pub fn buckets(&self) -> &[DailyBehaviorBucket] {
        &self.buckets
    }

    /// Number of trading days
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn daily_volume(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| to_f64(b.volume)).collect()
    }

    pub fn daily_instruments(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| b.instruments as f64).collect()
    }

    pub fn daily_directions(&self) -> Vec<i8> {
        self.buckets.iter().map(DailyBehaviorBucket::direction).collect()
    }

    pub fn daily_flips(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| f64::from(b.flips)).collect()
    }

    /// Total flips over the whole history
    pub fn total_flips(&self) -> u32 {
        self.buckets.iter().map(|b| b.flips).sum()
    }
}

#[derive(Default)]
struct DayAccumulator<'a> {
    volume: Decimal,
    net_quantity: Decimal,
    instruments: BTreeSet<&'a str>,
    flips: u32,
}

fn sign(value: Decimal) -> i8 {
    if value.is_zero() {
        0
    } else if value.is_sign_negative() {
        -1
    } else {
        1
    }
}

fn checked_add(total: Decimal, value: Decimal, index: usize) -> Result<Decimal> {
    total.checked_add(value).ok_or_else(|| Error::InvalidTrade {
        index,
        reason: format!("quantity {} overflows running totals", value.abs()),
    })
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
