//! Input domain checks
//!
//! Every numeric input is checked before it reaches the tier or irrigation
//! arithmetic. Values are never clamped; NaN and out-of-range values fail
//! with `InvalidInput` naming the field.

use super::types::WeatherSnapshot;
use crate::catalog::CropCategory;
use crate::error::{AdvisorError, Result};

pub const PH_MIN: f64 = 4.0;
pub const PH_MAX: f64 = 9.0;
pub const TEMP_MIN_C: f64 = -60.0;
pub const TEMP_MAX_C: f64 = 60.0;
pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AdvisorError::invalid(field, format!("must be a finite number, got {}", value)))
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(AdvisorError::invalid(
            field,
            format!("must be within [{}, {}], got {}", min, max, value),
        ));
    }
    Ok(())
}

pub fn validate_ph(ph: f64) -> Result<()> {
    check_range("soil_ph", ph, PH_MIN, PH_MAX)
}

pub fn validate_temperature(temperature_c: f64) -> Result<()> {
    check_range("temperature_c", temperature_c, TEMP_MIN_C, TEMP_MAX_C)
}

pub fn validate_rainfall(rainfall_mm: f64) -> Result<()> {
    check_finite("rainfall_mm", rainfall_mm)?;
    if rainfall_mm < 0.0 {
        return Err(AdvisorError::invalid(
            "rainfall_mm",
            format!("must not be negative, got {}", rainfall_mm),
        ));
    }
    Ok(())
}

pub fn validate_humidity(humidity_pct: f64) -> Result<()> {
    check_range("humidity_pct", humidity_pct, PERCENT_MIN, PERCENT_MAX)
}

pub fn validate_soil_moisture(soil_moisture_pct: f64) -> Result<()> {
    check_range("soil_moisture_pct", soil_moisture_pct, PERCENT_MIN, PERCENT_MAX)
}

fn check_base_dose(field: &'static str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(AdvisorError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

pub fn validate_moisture_threshold(threshold: f64) -> Result<()> {
    check_range("moisture_threshold", threshold, PERCENT_MIN, PERCENT_MAX)
}

/// Base NPK finite and non-negative, moisture threshold in [0, 100]
pub fn validate_category(category: &CropCategory) -> Result<()> {
    check_base_dose("base_nitrogen", category.base_nitrogen)?;
    check_base_dose("base_phosphorus", category.base_phosphorus)?;
    check_base_dose("base_potassium", category.base_potassium)?;
    validate_moisture_threshold(category.moisture_threshold)
}

pub fn validate_weather(weather: &WeatherSnapshot) -> Result<()> {
    validate_temperature(weather.temperature_c)?;
    validate_rainfall(weather.rainfall_mm)?;
    validate_humidity(weather.humidity_pct)?;
    validate_soil_moisture(weather.soil_moisture_pct)
}
