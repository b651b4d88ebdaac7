use serde::Serialize;

use crate::model::Boq;

use super::summary::BoqSummary;

/// Where in the tree a margin went negative
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum MarginScope {
    SubItem { item: usize, sub_item: usize },
    Item { item: usize },
    Preliminary,
    Boq,
}

/// A negative margin the caller should flag. Not an error: real costs
/// simply overran the percentage budget.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MarginWarning {
    pub scope: MarginScope,
    pub description: String,
    pub margin: f64,
}

impl std::fmt::Display for MarginWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let place = match &self.scope {
            MarginScope::SubItem { item, sub_item } => {
                format!("item {} / sub-item {}", item + 1, sub_item + 1)
            }
            MarginScope::Item { item } => format!("item {}", item + 1),
            MarginScope::Preliminary => "preliminaries".to_string(),
            MarginScope::Boq => "BOQ after discount".to_string(),
        };
        if self.description.is_empty() {
            write!(f, "{place}: negative margin {:.2}", self.margin)
        } else {
            write!(
                f,
                "{place} ({}): negative margin {:.2}",
                self.description, self.margin
            )
        }
    }
}

/// Collect every negative margin in a priced BOQ, leaf first. `summary`
/// must come from pricing `boq`.
pub fn margin_warnings(boq: &Boq, summary: &BoqSummary) -> Vec<MarginWarning> {
    let mut out = Vec::new();

    for (i, (item, priced)) in boq.items.iter().zip(&summary.items).enumerate() {
        for (j, (sub, sub_priced)) in item.sub_items.iter().zip(&priced.sub_items).enumerate() {
            if sub_priced.negotiable_margin < 0.0 {
                out.push(MarginWarning {
                    scope: MarginScope::SubItem {
                        item: i,
                        sub_item: j,
                    },
                    description: sub.description.clone(),
                    margin: sub_priced.negotiable_margin,
                });
            }
        }
        if priced.project_margin < 0.0 {
            out.push(MarginWarning {
                scope: MarginScope::Item { item: i },
                description: item.description.clone(),
                margin: priced.project_margin,
            });
        }
    }

    if summary.preliminary.negotiable_margin < 0.0 {
        out.push(MarginWarning {
            scope: MarginScope::Preliminary,
            description: boq.preliminary.description.clone(),
            margin: summary.preliminary.negotiable_margin,
        });
    }

    if summary.negotiable_margin_after_discount < 0.0 {
        out.push(MarginWarning {
            scope: MarginScope::Boq,
            description: boq.name.clone(),
            margin: summary.negotiable_margin_after_discount,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::policy::PricingPolicy;
    use crate::engine::sub_item::tests::sample_sub_item;
    use crate::engine::summary::rollup;
    use crate::model::{Item, MaterialLine};

    #[test]
    fn test_healthy_boq_has_no_warnings() {
        let mut item = Item::new("Tiling");
        item.sub_items.push(sample_sub_item());
        let boq = Boq {
            items: vec![item],
            ..Boq::default()
        };
        let summary = rollup(&boq, &PricingPolicy::default());
        assert!(margin_warnings(&boq, &summary).is_empty());
    }

    #[test]
    fn test_overrun_is_reported_at_each_level() {
        let mut sub = sample_sub_item();
        sub.description = "Marble cladding".to_string();
        sub.materials.push(MaterialLine::new("Marble", 10.0, 100.0));
        let mut item = Item::new("Facade");
        item.sub_items.push(sample_sub_item());
        item.sub_items.push(sub);
        let boq = Boq {
            name: "Tower".to_string(),
            items: vec![item],
            ..Boq::default()
        };

        let summary = rollup(&boq, &PricingPolicy::default());
        let warnings = margin_warnings(&boq, &summary);

        // sub-item 2: -580; item: 420 - 580 = -160
        assert_eq!(warnings.len(), 3);
        let leaf = MarginScope::SubItem {
            item: 0,
            sub_item: 1,
        };
        assert_eq!(warnings[0].scope, leaf);
        assert_eq!(warnings[0].margin, -580.0);
        assert_eq!(warnings[1].scope, MarginScope::Item { item: 0 });
        assert_eq!(warnings[1].margin, -160.0);
        assert_eq!(warnings[2].scope, MarginScope::Boq);
        assert!(warnings[0].to_string().contains("Marble cladding"));
    }
}
