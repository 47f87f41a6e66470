//! Engine configuration
//!
//! Defaults mirror the embedded `switch_config.json`.

mod loader;
mod types;

pub use loader::{load_config, load_config_from_str, load_default_config};
pub use types::{
    AccelerationTier, ChangePointConfig, DriftRule, FeatureDriftConfig, FlipAccelerationConfig,
    RecencyTier, SwitchConfig,
};
