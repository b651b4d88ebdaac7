use crate::model::{Item, PricingVersion, SubItem, VatMode};

use super::line::material_vat;
use super::percent_of;
use super::sub_item::{evaluate_cost_only, evaluate_with_surcharges, SubItemBreakdown};

/// The version-specific parts of pricing. Item and BOQ aggregation are
/// shared; a strategy decides how a sub-item is costed and what VAT an
/// item carries after its discount.
pub trait PricingStrategy {
    fn name(&self) -> &'static str;

    fn sub_item(&self, sub: &SubItem) -> SubItemBreakdown;

    fn item_vat(&self, item: &Item, after_discount: f64) -> f64;
}

/// Current rules: three-way surcharge split, selling price is the
/// discounted amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurchargeSplit;

impl PricingStrategy for SurchargeSplit {
    fn name(&self) -> &'static str {
        "surcharge-split"
    }

    fn sub_item(&self, sub: &SubItem) -> SubItemBreakdown {
        evaluate_with_surcharges(sub)
    }

    fn item_vat(&self, _item: &Item, _after_discount: f64) -> f64 {
        0.0
    }
}

/// Older records: sub-items are costed from materials and labour only and
/// VAT is added on top of each discounted item.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyVat {
    pub mode: VatMode,
}

impl PricingStrategy for LegacyVat {
    fn name(&self) -> &'static str {
        match self.mode {
            VatMode::ItemLevel => "legacy-vat (item-level)",
            VatMode::PerMaterial => "legacy-vat (per-material)",
        }
    }

    fn sub_item(&self, sub: &SubItem) -> SubItemBreakdown {
        evaluate_cost_only(sub)
    }

    fn item_vat(&self, item: &Item, after_discount: f64) -> f64 {
        match self.mode {
            VatMode::ItemLevel => percent_of(after_discount, item.vat_percentage),
            VatMode::PerMaterial => {
                let nested: f64 = item
                    .sub_items
                    .iter()
                    .flat_map(|sub| sub.materials.iter())
                    .map(material_vat)
                    .sum();
                let direct: f64 = item.materials.iter().map(material_vat).sum();
                nested + direct
            }
        }
    }
}

/// Pick the strategy a record's version calls for
pub fn for_version(version: PricingVersion, vat_mode: VatMode) -> Box<dyn PricingStrategy> {
    match version {
        PricingVersion::SurchargeSplit => Box::new(SurchargeSplit),
        PricingVersion::LegacyVat => Box::new(LegacyVat { mode: vat_mode }),
    }
}
