use serde::{Deserialize, Serialize};

use super::item::{Item, Preliminary};
use super::lenient;

/// Which pricing rules a record was built with
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PricingVersion {
    /// Misc / overhead-and-profit / transport split, no item VAT
    #[default]
    SurchargeSplit,
    /// Cost-only sub-items with VAT added on top of each item
    LegacyVat,
}

impl std::fmt::Display for PricingVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingVersion::SurchargeSplit => write!(f, "surcharge-split"),
            PricingVersion::LegacyVat => write!(f, "legacy-vat"),
        }
    }
}

impl std::str::FromStr for PricingVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surcharge-split" => Ok(PricingVersion::SurchargeSplit),
            "legacy-vat" => Ok(PricingVersion::LegacyVat),
            other => Err(format!(
                "unknown pricing version '{other}' (expected surcharge-split or legacy-vat)"
            )),
        }
    }
}

/// How the legacy variant charges VAT
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VatMode {
    /// One VAT percentage on the discounted item amount
    #[default]
    ItemLevel,
    /// Each material line carries its own VAT percentage
    PerMaterial,
}

/// A Bill of Quantities record
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Boq {
    #[serde(default)]
    pub name: String,
    /// Records without a version are priced with the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<PricingVersion>,
    #[serde(default)]
    pub vat_mode: VatMode,
    #[serde(default, deserialize_with = "lenient::number")]
    pub overall_discount_percentage: f64,
    #[serde(default)]
    pub preliminary: Preliminary,
    #[serde(default)]
    pub items: Vec<Item>,
}
