use serde::Serialize;

use super::policy::PricingPolicy;
use super::summary::BoqSummary;
use super::{num, percent_of, ratio_percent};

/// Advisory discount bounded by the minimum profit margin. Never applied
/// by the engine; callers surface it for the user to accept.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct DiscountSuggestion {
    pub max_safe_discount: f64,
    pub suggested_discount: f64,
}

/// Suggest an overall discount from the pre-discount realized margin.
///
/// `max_safe = max(0, margin − min_profit_margin)`, capped at
/// `max_suggested_discount`. The result always lies in `[0, cap]`.
pub fn suggest_discount(
    profit_margin_percentage: f64,
    policy: &PricingPolicy,
) -> DiscountSuggestion {
    let cap = num(policy.max_suggested_discount).max(0.0);
    let max_safe_discount =
        (num(profit_margin_percentage) - num(policy.min_profit_margin)).max(0.0);
    let suggested_discount = max_safe_discount.min(cap);

    DiscountSuggestion {
        max_safe_discount,
        suggested_discount,
    }
}

/// What the BOQ totals would be under a given overall discount
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct DiscountImpact {
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub grand_total: f64,
    pub negotiable_margin_after_discount: f64,
    pub profit_margin_after_discount: f64,
    pub below_min_margin: bool,
}

/// Re-run the discount step of a computed summary with another percentage.
/// The cost tree is not re-evaluated; only the combined subtotal and
/// internal cost are read.
pub fn discount_impact(
    summary: &BoqSummary,
    discount_percentage: f64,
    policy: &PricingPolicy,
) -> DiscountImpact {
    let discount_amount = percent_of(summary.combined_subtotal, discount_percentage);
    let grand_total = summary.combined_subtotal - discount_amount;
    let negotiable_margin_after_discount = grand_total - summary.combined_internal_cost;
    let profit_margin_after_discount = ratio_percent(negotiable_margin_after_discount, grand_total);

    DiscountImpact {
        discount_percentage: num(discount_percentage),
        discount_amount,
        grand_total,
        negotiable_margin_after_discount,
        profit_margin_after_discount,
        below_min_margin: profit_margin_after_discount < num(policy.min_profit_margin),
    }
}
