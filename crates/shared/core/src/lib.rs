//! Cadence Core Domain
//!
//! Pure domain types describing a trading client's activity: executions,
//! position snapshots and externally computed behavioral features.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{FeatureSet, OrderType, PositionSnapshot, Side, TradeRecord};
pub use values::{Price, Quantity, Symbol, Timestamp};
