use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::values::Symbol;

/// Pre-computed behavioral summary for a client
///
/// Produced outside this workspace (feature pipeline). Every field is
/// optional because upstream coverage varies by client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    /// Beta of client flow to 1-day market returns
    pub momentum_beta_1d: Option<f64>,
    /// Beta of client flow to 5-day market returns
    pub momentum_beta_5d: Option<f64>,
    /// Beta of client flow to 20-day market returns
    pub momentum_beta_20d: Option<f64>,
    /// Average holding period in days
    pub holding_period_avg: Option<f64>,
    /// Daily turnover ratio
    pub turnover: Option<f64>,
    /// Fraction of aggressive (market-style) orders, 0.0 - 1.0
    pub aggressiveness: Option<f64>,
    pub lead_lag_alpha: Option<f64>,
    /// Share of gross exposure per instrument
    pub exposure_concentration: BTreeMap<Symbol, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_deserializes() {
        let json = r#"{"momentum_beta_20d": 0.95, "exposure_concentration": {"EURUSD": 0.7, "USDJPY": 0.3}}"#;
        let features: FeatureSet = serde_json::from_str(json).unwrap();

        assert_eq!(features.momentum_beta_20d, Some(0.95));
        assert_eq!(features.aggressiveness, None);
        assert_eq!(features.exposure_concentration.get("USDJPY"), Some(&0.3));
    }

    #[test]
    fn test_empty_payload_is_default() {
        let features: FeatureSet = serde_json::from_str("{}").unwrap();
        assert_eq!(features, FeatureSet::default());
    }
}
