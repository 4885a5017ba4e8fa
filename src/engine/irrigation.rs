//! Irrigation decision
//!
//! Effective moisture is soil moisture plus 30% of recent rainfall. Irrigation
//! is needed when it falls below the category's threshold, which is raised by
//! 10 points in hot weather.

use serde::Serialize;

use super::validation;
use crate::catalog::{CropCatalog, CropCategory, DEFAULT_MOISTURE_THRESHOLD};
use crate::error::Result;

/// Fraction of recent rainfall (mm) credited to effective moisture (%)
pub const RAINFALL_WEIGHT: f64 = 0.3;

/// Above this temperature the threshold is raised
pub const HOT_WEATHER_C: f64 = 32.0;

/// Threshold increase applied in hot weather
pub const HOT_WEATHER_THRESHOLD_BONUS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrigationDecision {
    pub irrigation_needed: bool,
    pub effective_moisture: f64,
    pub adjusted_threshold: f64,
}

pub fn effective_moisture(moisture_pct: f64, rainfall_mm: f64) -> f64 {
    moisture_pct + rainfall_mm * RAINFALL_WEIGHT
}

pub fn adjusted_threshold(threshold: f64, temperature_c: f64) -> f64 {
    if temperature_c > HOT_WEATHER_C {
        threshold + HOT_WEATHER_THRESHOLD_BONUS
    } else {
        threshold
    }
}

/// Full decision with the intermediate values
pub fn evaluate(
    threshold: f64,
    moisture_pct: f64,
    rainfall_mm: f64,
    temperature_c: f64,
) -> Result<IrrigationDecision> {
    validation::validate_moisture_threshold(threshold)?;
    validation::validate_soil_moisture(moisture_pct)?;
    validation::validate_rainfall(rainfall_mm)?;
    validation::validate_temperature(temperature_c)?;

    let effective = effective_moisture(moisture_pct, rainfall_mm);
    let adjusted = adjusted_threshold(threshold, temperature_c);

    Ok(IrrigationDecision {
        irrigation_needed: effective < adjusted,
        effective_moisture: effective,
        adjusted_threshold: adjusted,
    })
}

/// true = irrigation needed
pub fn decide(
    category: &CropCategory,
    moisture_pct: f64,
    rainfall_mm: f64,
    temperature_c: f64,
) -> Result<bool> {
    let decision = evaluate(category.moisture_threshold, moisture_pct, rainfall_mm, temperature_c)?;
    tracing::debug!(
        "Irrigation for {}: effective {:.1}% vs threshold {:.1}% -> {}",
        category.id, decision.effective_moisture, decision.adjusted_threshold,
        decision.irrigation_needed
    );
    Ok(decision.irrigation_needed)
}

/// Decide by category id; unknown ids use the default threshold (50%)
pub fn decide_for_category_id(
    catalog: &CropCatalog,
    category_id: &str,
    moisture_pct: f64,
    rainfall_mm: f64,
    temperature_c: f64,
) -> Result<bool> {
    let threshold = catalog
        .lookup_category(category_id)
        .map(|c| c.moisture_threshold)
        .unwrap_or(DEFAULT_MOISTURE_THRESHOLD);
    Ok(evaluate(threshold, moisture_pct, rainfall_mm, temperature_c)?.irrigation_needed)
}
