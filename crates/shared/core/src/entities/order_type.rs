use serde::{Deserialize, Serialize};

/// Order type the client used for an execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Execute at current market price
    Market,
    /// Execute at specified price or better
    #[default]
    Limit,
    /// Market order triggered when price reaches stop price
    StopLoss,
    /// Limit order triggered when price reaches stop price
    StopLimit,
}

impl OrderType {
    /// Orders that take liquidity immediately when they fire
    pub fn is_aggressive(&self) -> bool {
        matches!(self, OrderType::Market | OrderType::StopLoss)
    }
}
