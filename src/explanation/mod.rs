pub mod types;
pub mod soil_ph;
pub mod generator;

pub use types::{Explanation, Severity, WarningCard};
pub use soil_ph::{check_variety_ph, PhStatus};
pub use generator::{generate_summary, ExplanationGenerator};
