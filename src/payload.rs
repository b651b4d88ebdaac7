use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::{BoqSummary, DiscountSuggestion, MarginWarning};
use crate::error::{BoqError, Result};
use crate::model::{Boq, PricingVersion};

/// Totals sent alongside the record. Mirrors the summary without the
/// per-line breakdowns.
#[derive(Debug, Serialize)]
pub struct PayloadTotals {
    pub items_subtotal: f64,
    pub preliminary_amount: f64,
    pub combined_subtotal: f64,
    pub overall_discount_percentage: f64,
    pub discount_amount: f64,
    pub grand_total: f64,
    pub combined_internal_cost: f64,
    pub planned_profit: f64,
    pub negotiable_margin_after_discount: f64,
    pub profit_margin_after_discount: f64,
    pub suggestion: DiscountSuggestion,
}

/// A record ready for submission: the source tree as entered plus every
/// computed figure
#[derive(Debug, Serialize)]
pub struct SubmissionPayload<'a> {
    pub prepared_at: DateTime<Utc>,
    pub pricing_version: PricingVersion,
    pub strategy: &'a str,
    pub boq: &'a Boq,
    pub totals: PayloadTotals,
    pub breakdown: &'a BoqSummary,
    pub warnings: &'a [MarginWarning],
}

/// Build the payload. `summary` and `warnings` must come from pricing `boq`
/// under `version`.
pub fn build<'a>(
    boq: &'a Boq,
    version: PricingVersion,
    summary: &'a BoqSummary,
    warnings: &'a [MarginWarning],
    prepared_at: DateTime<Utc>,
) -> SubmissionPayload<'a> {
    SubmissionPayload {
        prepared_at,
        pricing_version: version,
        strategy: &summary.strategy,
        boq,
        totals: PayloadTotals {
            items_subtotal: summary.items_subtotal,
            preliminary_amount: summary.preliminary.client_amount,
            combined_subtotal: summary.combined_subtotal,
            overall_discount_percentage: summary.overall_discount_percentage,
            discount_amount: summary.discount_amount,
            grand_total: summary.grand_total,
            combined_internal_cost: summary.combined_internal_cost,
            planned_profit: summary.combined_planned_profit,
            negotiable_margin_after_discount: summary.negotiable_margin_after_discount,
            profit_margin_after_discount: summary.profit_margin_after_discount,
            suggestion: summary.suggestion,
        },
        breakdown: summary,
        warnings,
    }
}

pub fn to_json(payload: &SubmissionPayload<'_>) -> Result<String> {
    serde_json::to_string_pretty(payload).map_err(|e| BoqError::Serialize {
        what: "payload".to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{margin_warnings, rollup, PricingPolicy};
    use crate::model::{Item, SubItem, Surcharges};
    use chrono::TimeZone;

    #[test]
    fn test_payload_carries_tree_and_totals() {
        let mut sub = SubItem::new("Screed", Surcharges::default());
        sub.quantity = 4.0;
        sub.rate = 250.0;
        let mut item = Item::new("Floors");
        item.sub_items.push(sub);
        let boq = Boq {
            name: "Warehouse".to_string(),
            items: vec![item],
            ..Boq::default()
        };

        let summary = rollup(&boq, &PricingPolicy::default());
        let warnings = margin_warnings(&boq, &summary);
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let version = PricingVersion::SurchargeSplit;
        let payload = build(&boq, version, &summary, &warnings, at);
        let json = to_json(&payload).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["prepared_at"], "2026-03-01T09:30:00Z");
        assert_eq!(value["pricing_version"], "surcharge-split");
        assert_eq!(value["boq"]["name"], "Warehouse");
        assert_eq!(value["boq"]["items"][0]["sub_items"][0]["rate"], 250.0);
        assert_eq!(value["totals"]["grand_total"], 1000.0);
        assert_eq!(value["totals"]["planned_profit"], 250.0);
        assert_eq!(value["breakdown"]["items"][0]["total_client_cost"], 1000.0);
        assert!(value["warnings"].as_array().unwrap().is_empty());
    }
}
