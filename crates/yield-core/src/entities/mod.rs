//! Entity structs for campaign yield optimization.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod audit;
mod campaign;
mod line_item;
mod params;

pub use audit::AuditEntry;
pub use campaign::Campaign;
pub use line_item::{LineItem, MARGIN_MAX, MARGIN_MIN};
pub use params::OptimizationParameters;
