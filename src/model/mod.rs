mod boq;
mod item;
pub mod lenient;
mod line;

pub use boq::{Boq, PricingVersion, VatMode};
pub use item::{
    Item, Preliminary, SubItem, Surcharges, DEFAULT_MISC_PERCENTAGE,
    DEFAULT_OVERHEAD_PROFIT_PERCENTAGE, DEFAULT_TRANSPORT_PERCENTAGE,
};
pub use line::{LabourLine, MaterialLine, WorkType};
