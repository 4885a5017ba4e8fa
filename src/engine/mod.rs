//! Recommendation Engine
//!
//! Pure, synchronous functions over their inputs: no I/O, no shared state.
//! Identical inputs always produce identical outputs.
//!
//! ## Architecture
//! - `types.rs` - SoilReading, WeatherSnapshot, FertilizerTier, Npk
//! - `validation.rs` - Domain checks producing `InvalidInput`
//! - `compatibility.rs` - Variety pH band check (advisory)
//! - `fertilizer.rs` - NPK adjustment and tier classification
//! - `irrigation.rs` - Effective moisture vs crop threshold
//! - `recommendation.rs` - Combines the above for one request

pub mod types;
pub mod validation;
pub mod compatibility;
pub mod fertilizer;
pub mod irrigation;
pub mod recommendation;

pub use types::{format_kg_ha, FertilizerTier, Npk, SoilReading, WeatherSnapshot};
pub use compatibility::{check_compatibility, Compatibility, PhFit};
pub use fertilizer::{estimate, FertilizerEstimate};
pub use irrigation::{decide, decide_for_category_id, IrrigationDecision};
pub use recommendation::{compute_recommendation, Recommendation};
