use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderType, Side};
use crate::values::{Price, Quantity, Symbol, Timestamp};

/// A single client execution
///
/// Trade records are facts supplied by the caller. Analytics read them and
/// never mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: Timestamp,
    /// The instrument that was traded
    pub instrument: Symbol,
    pub side: Side,
    /// Executed quantity (unsigned)
    pub quantity: Quantity,
    pub price: Price,
    #[serde(default)]
    pub order_type: OrderType,
}

impl TradeRecord {
    /// Create a limit-order execution
    pub fn new(
        timestamp: Timestamp,
        instrument: impl Into<Symbol>,
        side: Side,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            timestamp,
            instrument: instrument.into(),
            side,
            quantity,
            price,
            order_type: OrderType::Limit,
        }
    }

    /// Set the order type
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Quantity with direction applied (buys positive, sells negative)
    pub fn signed_quantity(&self) -> Decimal {
        self.quantity * self.side.sign()
    }

    /// UTC calendar day of the execution
    pub fn trade_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}
