use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Quantity, Symbol, Timestamp};

/// Net exposure per instrument at a point in time
///
/// Exposures are signed: positive is long, negative is short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub as_of: Timestamp,
    #[serde(default)]
    pub exposures: BTreeMap<Symbol, Quantity>,
}

impl PositionSnapshot {
    pub fn new(as_of: Timestamp) -> Self {
        Self {
            as_of,
            exposures: BTreeMap::new(),
        }
    }

    /// Builder-style exposure setter
    pub fn with_exposure(mut self, instrument: impl Into<Symbol>, net: Quantity) -> Self {
        self.exposures.insert(instrument.into(), net);
        self
    }

    /// Net exposure for an instrument (zero if flat or unknown)
    pub fn net_exposure(&self, instrument: &str) -> Quantity {
        self.exposures
            .get(instrument)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of absolute exposures
    pub fn gross_exposure(&self) -> Decimal {
        self.exposures.values().map(|q| q.abs()).sum()
    }

    /// Number of instruments with a non-zero exposure
    pub fn open_instruments(&self) -> usize {
        self.exposures.values().filter(|q| !q.is_zero()).count()
    }
}
