use serde::{Deserialize, Serialize};

use crate::model::{lenient, PricingVersion};

/// Lowest realized margin (percent) a suggested discount may leave
pub const MIN_PROFIT_MARGIN: f64 = 15.0;

/// Hard cap on any suggested discount (percent)
pub const MAX_SUGGESTED_DISCOUNT: f64 = 10.0;

/// Business policy consulted by the BOQ aggregator. Lives in the `[pricing]`
/// table of config.toml; missing fields keep their defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PricingPolicy {
    #[serde(deserialize_with = "lenient::number")]
    pub min_profit_margin: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub max_suggested_discount: f64,
    /// Version applied to records that don't carry one
    pub default_version: PricingVersion,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            min_profit_margin: MIN_PROFIT_MARGIN,
            max_suggested_discount: MAX_SUGGESTED_DISCOUNT,
            default_version: PricingVersion::default(),
        }
    }
}
