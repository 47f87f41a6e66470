mod features;
mod order_type;
mod position;
mod side;
mod trade;

pub use features::FeatureSet;
pub use order_type::OrderType;
pub use position::PositionSnapshot;
pub use side::Side;
pub use trade::TradeRecord;
