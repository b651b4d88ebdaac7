use serde::Serialize;

use crate::model::Item;

use super::line::total_cost;
use super::percent_of;
use super::strategy::PricingStrategy;
use super::sub_item::SubItemBreakdown;

/// Computed figures for one item
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ItemBreakdown {
    pub sub_items: Vec<SubItemBreakdown>,
    pub total_client_cost: f64,
    pub total_internal_cost: f64,
    pub total_planned_profit: f64,
    /// Sum of the sub-items' negotiable margins
    pub total_actual_profit: f64,
    pub total_misc_amount: f64,
    pub total_transport_amount: f64,
    pub total_overhead_profit_amount: f64,
    /// Cost of the item's direct materials and labour
    pub direct_cost: f64,
    pub discount_amount: f64,
    pub after_discount: f64,
    pub vat_amount: f64,
    pub selling_price: f64,
    /// Client cost minus internal cost. Near zero when the percentages
    /// and the real costs agree.
    pub project_margin: f64,
}

/// Cost of materials and labour attached directly to an item
pub fn direct_cost(item: &Item) -> f64 {
    total_cost(&item.materials) + total_cost(&item.labour)
}

/// Roll an item's sub-items up into item totals.
///
/// Direct materials and labour come from records that predate sub-items.
/// They were cost annotations only, so they raise the internal cost and
/// leave the client cost and the actual profit untouched.
pub fn evaluate(item: &Item, strategy: &dyn PricingStrategy) -> ItemBreakdown {
    let sub_items: Vec<SubItemBreakdown> = item
        .sub_items
        .iter()
        .map(|sub| strategy.sub_item(sub))
        .collect();

    let mut out = ItemBreakdown::default();
    for sub in &sub_items {
        out.total_client_cost += sub.client_amount;
        out.total_internal_cost += sub.internal_cost;
        out.total_planned_profit += sub.planned_profit;
        out.total_actual_profit += sub.negotiable_margin;
        out.total_misc_amount += sub.misc_amount;
        out.total_transport_amount += sub.transport_amount;
        out.total_overhead_profit_amount += sub.overhead_profit_amount;
    }

    out.direct_cost = direct_cost(item);
    out.total_internal_cost += out.direct_cost;

    out.discount_amount = percent_of(out.total_client_cost, item.discount_percentage);
    out.after_discount = out.total_client_cost - out.discount_amount;
    out.vat_amount = strategy.item_vat(item, out.after_discount);
    out.selling_price = out.after_discount + out.vat_amount;
    out.project_margin = out.total_client_cost - out.total_internal_cost;
    out.sub_items = sub_items;

    tracing::debug!(
        description = %item.description,
        strategy = strategy.name(),
        client_cost = out.total_client_cost,
        internal_cost = out.total_internal_cost,
        selling_price = out.selling_price,
        "priced item"
    );

    out
}
