use serde::{Deserialize, Serialize};

use crate::engine::PricingPolicy;
use crate::model::Surcharges;

/// config.toml. Every table is optional.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingPolicy,
    /// Percentages given to newly created sub-items and preliminaries
    #[serde(default)]
    pub defaults: Surcharges,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency: String,
    pub decimals: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency: "AED".to_string(),
            decimals: 2,
        }
    }
}
