use serde::Serialize;

use crate::model::{SubItem, Surcharges};

use super::line::total_cost;
use super::{num, percent_of};

/// Computed figures for one sub-item
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct SubItemBreakdown {
    pub client_amount: f64,
    pub transport_amount: f64,
    pub overhead_profit_amount: f64,
    pub misc_amount: f64,
    pub material_cost: f64,
    pub labour_cost: f64,
    pub internal_cost: f64,
    pub planned_profit: f64,
    /// Realized profit. Negative when real costs overran the budget.
    pub negotiable_margin: f64,
}

/// Percentage amounts taken against a client amount
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SurchargeAmounts {
    pub transport: f64,
    pub overhead_profit: f64,
    pub misc: f64,
}

impl SurchargeAmounts {
    /// Order is transport, overhead-and-profit, misc.
    pub(crate) fn of(client_amount: f64, surcharges: &Surcharges) -> Self {
        let transport = percent_of(client_amount, surcharges.transport_percentage);
        let overhead_profit = percent_of(client_amount, surcharges.overhead_profit_percentage);
        let misc = percent_of(client_amount, surcharges.misc_percentage);
        Self {
            transport,
            overhead_profit,
            misc,
        }
    }

    pub(crate) fn total(&self) -> f64 {
        self.misc + self.overhead_profit + self.transport
    }
}

/// `quantity × rate`
pub fn client_amount(sub: &SubItem) -> f64 {
    num(sub.quantity) * num(sub.rate)
}

/// Price a sub-item with the misc / overhead-and-profit / transport split.
///
/// Surcharges are taken against the client amount, never against the
/// material and labour cost. The overhead-and-profit amount is the planned
/// profit; the negotiable margin is whatever is left of the client amount
/// once every cost, planned profit included, is paid.
pub fn evaluate_with_surcharges(sub: &SubItem) -> SubItemBreakdown {
    let client_amount = client_amount(sub);
    let surcharges = SurchargeAmounts::of(client_amount, &sub.surcharges());
    let material_cost = total_cost(&sub.materials);
    let labour_cost = total_cost(&sub.labour);

    let internal_cost = material_cost
        + labour_cost
        + surcharges.misc
        + surcharges.overhead_profit
        + surcharges.transport;

    let breakdown = SubItemBreakdown {
        client_amount,
        transport_amount: surcharges.transport,
        overhead_profit_amount: surcharges.overhead_profit,
        misc_amount: surcharges.misc,
        material_cost,
        labour_cost,
        internal_cost,
        planned_profit: surcharges.overhead_profit,
        negotiable_margin: client_amount - internal_cost,
    };

    tracing::trace!(
        description = %sub.description,
        client_amount,
        internal_cost,
        negotiable_margin = breakdown.negotiable_margin,
        "priced sub-item"
    );

    breakdown
}

/// Price a sub-item from material and labour cost alone. The surcharge
/// percentages are not read and there is no planned profit.
pub fn evaluate_cost_only(sub: &SubItem) -> SubItemBreakdown {
    let client_amount = client_amount(sub);
    let material_cost = total_cost(&sub.materials);
    let labour_cost = total_cost(&sub.labour);
    let internal_cost = material_cost + labour_cost;

    SubItemBreakdown {
        client_amount,
        material_cost,
        labour_cost,
        internal_cost,
        negotiable_margin: client_amount - internal_cost,
        ..SubItemBreakdown::default()
    }
}
