//! Cost rollup engine.
//!
//! Pure functions over a BOQ tree, leaf to root: line costs, sub-items,
//! items, then the whole BOQ with preliminaries and the overall discount.
//! Nothing here fails or mutates its input. Numbers that aren't finite are
//! read as 0 and amounts are kept at full precision.

mod discount;
mod item;
mod line;
mod policy;
mod strategy;
mod sub_item;
mod summary;
mod warnings;

pub use discount::{discount_impact, suggest_discount, DiscountImpact, DiscountSuggestion};
pub use item::{direct_cost, evaluate as evaluate_item, ItemBreakdown};
pub use line::{material_vat, total_cost, LineCost};
pub use policy::{PricingPolicy, MAX_SUGGESTED_DISCOUNT, MIN_PROFIT_MARGIN};
pub use strategy::{for_version, LegacyVat, PricingStrategy, SurchargeSplit};
pub use sub_item::{client_amount, evaluate_cost_only, evaluate_with_surcharges, SubItemBreakdown};
pub use summary::{evaluate, evaluate_preliminary, rollup, BoqSummary, PreliminaryBreakdown};
pub use warnings::{margin_warnings, MarginScope, MarginWarning};

use crate::model::lenient::finite_or_zero;

fn num(value: f64) -> f64 {
    finite_or_zero(value)
}

/// `amount × pct / 100`
fn percent_of(amount: f64, pct: f64) -> f64 {
    num(amount) * num(pct) / 100.0
}

/// `numerator / denominator` as a percentage, 0 over a zero base
fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    num(numerator * 100.0 / denominator)
}
