use serde::{Deserialize, Serialize};

use super::lenient;
use super::line::{LabourLine, MaterialLine};

pub const DEFAULT_MISC_PERCENTAGE: f64 = 10.0;
pub const DEFAULT_OVERHEAD_PROFIT_PERCENTAGE: f64 = 25.0;
pub const DEFAULT_TRANSPORT_PERCENTAGE: f64 = 5.0;

/// The three percentage surcharges carried by sub-items and the
/// preliminary block. All are taken against the client amount.
/// Fields missing from a config table fall back to the defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Surcharges {
    #[serde(deserialize_with = "lenient::number")]
    pub misc_percentage: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub overhead_profit_percentage: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub transport_percentage: f64,
}

impl Default for Surcharges {
    fn default() -> Self {
        Self {
            misc_percentage: DEFAULT_MISC_PERCENTAGE,
            overhead_profit_percentage: DEFAULT_OVERHEAD_PROFIT_PERCENTAGE,
            transport_percentage: DEFAULT_TRANSPORT_PERCENTAGE,
        }
    }
}

/// A priced line of work inside an item
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SubItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    /// Client unit rate
    #[serde(default, deserialize_with = "lenient::number")]
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub misc_percentage: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub overhead_profit_percentage: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub transport_percentage: f64,
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    #[serde(default)]
    pub labour: Vec<LabourLine>,
}

impl SubItem {
    /// An empty sub-item carrying the given surcharge percentages
    pub fn new(description: impl Into<String>, surcharges: Surcharges) -> Self {
        Self {
            description: description.into(),
            misc_percentage: surcharges.misc_percentage,
            overhead_profit_percentage: surcharges.overhead_profit_percentage,
            transport_percentage: surcharges.transport_percentage,
            ..Self::default()
        }
    }

    pub fn surcharges(&self) -> Surcharges {
        Surcharges {
            misc_percentage: self.misc_percentage,
            overhead_profit_percentage: self.overhead_profit_percentage,
            transport_percentage: self.transport_percentage,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Item {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub discount_percentage: f64,
    /// Only read by the legacy item-level VAT mode
    #[serde(default, deserialize_with = "lenient::number")]
    pub vat_percentage: f64,
    #[serde(default)]
    pub sub_items: Vec<SubItem>,
    /// Direct materials from records that predate sub-items. Cost only:
    /// they add to internal cost and never to the client amount.
    #[serde(default)]
    pub materials: Vec<MaterialLine>,
    /// Direct labour from records that predate sub-items. Cost only.
    #[serde(default)]
    pub labour: Vec<LabourLine>,
}

impl Item {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Project-wide approval and mobilization costs, priced like a sub-item
/// but with its internal cost entered directly.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Preliminary {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub internal_cost: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub misc_percentage: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub overhead_profit_percentage: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub transport_percentage: f64,
}

impl Preliminary {
    pub fn new(description: impl Into<String>, surcharges: Surcharges) -> Self {
        Self {
            description: description.into(),
            misc_percentage: surcharges.misc_percentage,
            overhead_profit_percentage: surcharges.overhead_profit_percentage,
            transport_percentage: surcharges.transport_percentage,
            ..Self::default()
        }
    }

    pub fn surcharges(&self) -> Surcharges {
        Surcharges {
            misc_percentage: self.misc_percentage,
            overhead_profit_percentage: self.overhead_profit_percentage,
            transport_percentage: self.transport_percentage,
        }
    }
}
