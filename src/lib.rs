//! Crop Advisor
//!
//! Fertilizer and irrigation recommendations for a crop variety, soil pH and
//! current weather.
//!
//! - `catalog/`: crop categories, varieties and the district table
//! - `engine/`: validation, compatibility, fertilizer estimate, irrigation decision
//! - `explanation/`: soil pH status and explanation text
//! - `collaborators/`: weather provider, advice generator, history store (feature `api`)
//! - `api_server`: axum router over all of the above (feature `api`)
//!
//! The engine is pure and synchronous; everything that talks to the network
//! sits behind the `api` feature.

pub mod error;
pub mod catalog;
pub mod engine;
pub mod explanation;

#[cfg(feature = "api")]
pub mod config;

#[cfg(feature = "api")]
pub mod collaborators;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::{AdvisorError, Result};
pub use catalog::{CropCatalog, CropCategory, CropVariety};
pub use engine::{compute_recommendation, FertilizerTier, Npk, Recommendation, WeatherSnapshot};
pub use explanation::{Explanation, ExplanationGenerator};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};

#[cfg(feature = "api")]
pub use config::ServerConfig;
