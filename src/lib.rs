pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod payload;

pub use config::{Config, DisplaySettings};
pub use engine::{rollup, BoqSummary, PricingPolicy, PricingStrategy};
pub use error::{BoqError, Result};
pub use model::{Boq, Item, LabourLine, MaterialLine, Preliminary, PricingVersion, SubItem};
