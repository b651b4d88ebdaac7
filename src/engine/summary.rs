use serde::Serialize;

use crate::model::{Boq, Preliminary};

use super::discount::{suggest_discount, DiscountSuggestion};
use super::item::{self, ItemBreakdown};
use super::policy::PricingPolicy;
use super::strategy::{self, PricingStrategy};
use super::sub_item::SurchargeAmounts;
use super::{num, percent_of, ratio_percent};

/// Computed figures for the preliminaries line
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct PreliminaryBreakdown {
    pub client_amount: f64,
    pub transport_amount: f64,
    pub overhead_profit_amount: f64,
    pub misc_amount: f64,
    /// The internal cost as entered, before surcharges
    pub base_cost: f64,
    pub internal_cost: f64,
    pub planned_profit: f64,
    pub negotiable_margin: f64,
}

/// Same percentage math as a sub-item, with the entered internal cost
/// standing in for materials and labour.
pub fn evaluate_preliminary(pre: &Preliminary) -> PreliminaryBreakdown {
    let client_amount = num(pre.quantity) * num(pre.rate);
    let surcharges = SurchargeAmounts::of(client_amount, &pre.surcharges());
    let base_cost = num(pre.internal_cost);
    let internal_cost = base_cost + surcharges.total();

    PreliminaryBreakdown {
        client_amount,
        transport_amount: surcharges.transport,
        overhead_profit_amount: surcharges.overhead_profit,
        misc_amount: surcharges.misc,
        base_cost,
        internal_cost,
        planned_profit: surcharges.overhead_profit,
        negotiable_margin: client_amount - internal_cost,
    }
}

/// Totals for a whole BOQ
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct BoqSummary {
    pub strategy: String,
    pub items: Vec<ItemBreakdown>,
    pub preliminary: PreliminaryBreakdown,
    /// Client cost of all items before any discount
    pub items_subtotal: f64,
    /// Sum of item selling prices (after item discounts and VAT)
    pub items_selling_total: f64,
    pub combined_subtotal: f64,
    pub combined_internal_cost: f64,
    pub combined_planned_profit: f64,
    pub combined_actual_profit: f64,
    pub overall_discount_percentage: f64,
    pub discount_amount: f64,
    pub grand_total: f64,
    pub negotiable_margin_after_discount: f64,
    /// Realized profit over the items subtotal, before the overall discount
    pub profit_margin_percentage: f64,
    pub profit_margin_after_discount: f64,
    pub suggestion: DiscountSuggestion,
}

/// Price a BOQ with the strategy its version calls for, falling back to the
/// policy's default version.
pub fn rollup(boq: &Boq, policy: &PricingPolicy) -> BoqSummary {
    let version = boq.version.unwrap_or(policy.default_version);
    let strategy = strategy::for_version(version, boq.vat_mode);
    evaluate(boq, strategy.as_ref(), policy)
}

/// Price a BOQ: items, then preliminaries, then the overall discount.
///
/// The overall discount applies to the items' pre-discount client cost plus
/// the preliminary amount; item discounts only shape item selling prices.
/// Margins over a zero base are reported as 0.
pub fn evaluate(boq: &Boq, strategy: &dyn PricingStrategy, policy: &PricingPolicy) -> BoqSummary {
    let items: Vec<ItemBreakdown> = boq
        .items
        .iter()
        .map(|it| item::evaluate(it, strategy))
        .collect();
    let preliminary = evaluate_preliminary(&boq.preliminary);

    let items_subtotal: f64 = items.iter().map(|b| b.total_client_cost).sum();
    let items_selling_total: f64 = items.iter().map(|b| b.selling_price).sum();
    let items_internal: f64 = items.iter().map(|b| b.total_internal_cost).sum();
    let items_planned: f64 = items.iter().map(|b| b.total_planned_profit).sum();
    let items_actual: f64 = items.iter().map(|b| b.total_actual_profit).sum();

    let combined_subtotal = items_subtotal + preliminary.client_amount;
    let combined_internal_cost = items_internal + preliminary.internal_cost;
    let combined_planned_profit = items_planned + preliminary.planned_profit;
    let combined_actual_profit = items_actual + preliminary.negotiable_margin;

    let overall_discount_percentage = num(boq.overall_discount_percentage);
    let discount_amount = percent_of(combined_subtotal, overall_discount_percentage);
    let grand_total = combined_subtotal - discount_amount;
    let negotiable_margin_after_discount = grand_total - combined_internal_cost;

    let profit_margin_percentage = ratio_percent(combined_actual_profit, items_subtotal);
    let profit_margin_after_discount = ratio_percent(negotiable_margin_after_discount, grand_total);
    let suggestion = suggest_discount(profit_margin_percentage, policy);

    tracing::debug!(
        name = %boq.name,
        strategy = strategy.name(),
        items = items.len(),
        combined_subtotal,
        grand_total,
        combined_internal_cost,
        suggested_discount = suggestion.suggested_discount,
        "priced BOQ"
    );

    BoqSummary {
        strategy: strategy.name().to_string(),
        items,
        preliminary,
        items_subtotal,
        items_selling_total,
        combined_subtotal,
        combined_internal_cost,
        combined_planned_profit,
        combined_actual_profit,
        overall_discount_percentage,
        discount_amount,
        grand_total,
        negotiable_margin_after_discount,
        profit_margin_percentage,
        profit_margin_after_discount,
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::discount::discount_impact;
    use crate::engine::strategy::SurchargeSplit;
    use crate::engine::sub_item::tests::sample_sub_item;
    use crate::model::{Item, PricingVersion, Surcharges, VatMode};

    fn sample_boq() -> Boq {
        let mut item = Item::new("Ground floor finishes");
        item.sub_items.push(sample_sub_item());
        item.sub_items.push(sample_sub_item());
        item.discount_percentage = 10.0;

        let mut preliminary = Preliminary::new("Approvals and mobilization", Surcharges::default());
        preliminary.quantity = 1.0;
        preliminary.rate = 500.0;
        preliminary.internal_cost = 100.0;

        Boq {
            name: "Villa 12".to_string(),
            overall_discount_percentage: 5.0,
            preliminary,
            items: vec![item],
            ..Boq::default()
        }
    }

    #[test]
    fn test_preliminary_breakdown() {
        let b = evaluate_preliminary(&sample_boq().preliminary);
        assert_eq!(b.client_amount, 500.0);
        assert_eq!(b.misc_amount, 50.0);
        assert_eq!(b.overhead_profit_amount, 125.0);
        assert_eq!(b.transport_amount, 25.0);
        assert_eq!(b.base_cost, 100.0);
        assert_eq!(b.internal_cost, 300.0);
        assert_eq!(b.planned_profit, 125.0);
        assert_eq!(b.negotiable_margin, 200.0);
    }

    #[test]
    fn test_boq_totals() {
        let s = rollup(&sample_boq(), &PricingPolicy::default());
        assert_eq!(s.strategy, "surcharge-split");
        assert_eq!(s.items_subtotal, 2000.0);
        assert_eq!(s.items_selling_total, 1800.0);
        assert_eq!(s.combined_subtotal, 2500.0);
        assert_eq!(s.discount_amount, 125.0);
        assert_eq!(s.grand_total, 2375.0);
        assert_eq!(s.combined_internal_cost, 1460.0);
        assert_eq!(s.negotiable_margin_after_discount, 915.0);
        assert_eq!(s.combined_planned_profit, 625.0);
        assert_eq!(s.combined_actual_profit, 1040.0);
        // 1040 / 2000
        assert_eq!(s.profit_margin_percentage, 52.0);
        let expected = 915.0 / 2375.0 * 100.0;
        assert!((s.profit_margin_after_discount - expected).abs() < 1e-12);
        assert_eq!(s.suggestion.max_safe_discount, 37.0);
        assert_eq!(s.suggestion.suggested_discount, 10.0);
    }

    #[test]
    fn test_suggestion_is_not_applied() {
        let s = rollup(&sample_boq(), &PricingPolicy::default());
        assert_eq!(s.overall_discount_percentage, 5.0);
        assert_eq!(s.grand_total, 2375.0);
    }

    #[test]
    fn test_zero_items_subtotal_guards_margins() {
        let mut boq = sample_boq();
        boq.items.clear();
        let s = rollup(&boq, &PricingPolicy::default());
        assert_eq!(s.items_subtotal, 0.0);
        assert_eq!(s.profit_margin_percentage, 0.0);
        assert_eq!(s.suggestion.suggested_discount, 0.0);

        let empty = rollup(&Boq::default(), &PricingPolicy::default());
        assert_eq!(empty.grand_total, 0.0);
        assert_eq!(empty.profit_margin_percentage, 0.0);
        assert_eq!(empty.profit_margin_after_discount, 0.0);
        assert!(empty.profit_margin_after_discount.is_finite());
    }

    #[test]
    fn test_full_discount_zero_grand_total() {
        let mut boq = sample_boq();
        boq.overall_discount_percentage = 100.0;
        let s = rollup(&boq, &PricingPolicy::default());
        assert_eq!(s.grand_total, 0.0);
        assert_eq!(s.profit_margin_after_discount, 0.0);
    }

    #[test]
    fn test_grand_total_non_increasing_in_discount() {
        let mut boq = sample_boq();
        let mut previous = f64::INFINITY;
        for step in 0..=200 {
            boq.overall_discount_percentage = step as f64 * 0.5;
            let s = rollup(&boq, &PricingPolicy::default());
            assert!(s.grand_total <= previous);
            previous = s.grand_total;
        }
    }

    #[test]
    fn test_idempotent() {
        let boq = sample_boq();
        let before = boq.clone();
        let first = rollup(&boq, &PricingPolicy::default());
        let second = rollup(&boq, &PricingPolicy::default());
        assert_eq!(first, second);
        assert_eq!(first.grand_total.to_bits(), second.grand_total.to_bits());
        assert_eq!(boq, before);
    }

    #[test]
    fn test_impact_matches_evaluation() {
        let policy = PricingPolicy::default();
        let mut boq = sample_boq();
        let base = rollup(&boq, &policy);
        for pct in [0.0, 2.5, 7.5, 10.0, 40.0] {
            boq.overall_discount_percentage = pct;
            let direct = rollup(&boq, &policy);
            let impact = discount_impact(&base, pct, &policy);
            assert_eq!(impact.grand_total, direct.grand_total);
            assert_eq!(impact.discount_amount, direct.discount_amount);
            assert_eq!(
                impact.negotiable_margin_after_discount,
                direct.negotiable_margin_after_discount
            );
        }
        let steep = discount_impact(&base, 40.0, &policy);
        assert!(steep.below_min_margin);
        let mild = discount_impact(&base, 5.0, &policy);
        assert!(!mild.below_min_margin);
    }

    #[test]
    fn test_version_selects_strategy() {
        let mut boq = sample_boq();
        boq.version = Some(PricingVersion::LegacyVat);
        boq.vat_mode = VatMode::ItemLevel;
        boq.items[0].vat_percentage = 5.0;

        let s = rollup(&boq, &PricingPolicy::default());
        assert_eq!(s.strategy, "legacy-vat (item-level)");
        assert_eq!(s.items[0].selling_price, 1890.0);
        assert_eq!(s.items_subtotal, 2000.0);

        boq.version = None;
        let policy = PricingPolicy {
            default_version: PricingVersion::LegacyVat,
            ..PricingPolicy::default()
        };
        assert_eq!(rollup(&boq, &policy).strategy, "legacy-vat (item-level)");
        let fallback = rollup(&boq, &PricingPolicy::default());
        assert_eq!(fallback.strategy, "surcharge-split");
    }

    #[test]
    fn test_explicit_strategy() {
        let s = evaluate(&sample_boq(), &SurchargeSplit, &PricingPolicy::default());
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].sub_items.len(), 2);
    }
}
