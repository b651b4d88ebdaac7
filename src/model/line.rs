use serde::{Deserialize, Serialize};

use super::lenient;

/// A material entry: `quantity × unit_price`
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct MaterialLine {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_price: f64,
    /// Only read by the legacy per-material VAT mode
    #[serde(default, deserialize_with = "lenient::number")]
    pub vat_percentage: f64,
}

impl MaterialLine {
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    PieceRate,
    Contract,
    #[default]
    DailyWages,
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkType::PieceRate => write!(f, "piece rate"),
            WorkType::Contract => write!(f, "contract"),
            WorkType::DailyWages => write!(f, "daily wages"),
        }
    }
}

/// A labour entry: `hours × rate_per_hour`. The work type is informational.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LabourLine {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub work_type: WorkType,
    #[serde(default, deserialize_with = "lenient::number")]
    pub hours: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rate_per_hour: f64,
}

impl LabourLine {
    pub fn new(work_type: WorkType, hours: f64, rate_per_hour: f64) -> Self {
        Self {
            work_type,
            hours,
            rate_per_hour,
            ..Self::default()
        }
    }
}
