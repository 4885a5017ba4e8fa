//! Per-request input and output types for the recommendation engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation;
use crate::error::Result;

/// Soil pH reading, validated to [4.0, 9.0] on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilReading {
    ph: f64,
}

impl SoilReading {
    pub fn new(ph: f64) -> Result<Self> {
        validation::validate_ph(ph)?;
        Ok(SoilReading { ph })
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }
}

/// Current weather at the farm, as supplied by the weather provider.
///
/// Field aliases accept the provider's snake_case names
/// (`temperature`, `rainfall`, `humidity`, `soil_moisture`, `description`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    #[serde(alias = "temperature", alias = "temperature_c")]
    pub temperature_c: f64,

    #[serde(alias = "rainfall", alias = "rainfall_mm")]
    pub rainfall_mm: f64,

    #[serde(alias = "humidity", alias = "humidity_pct")]
    pub humidity_pct: f64,

    #[serde(alias = "soil_moisture", alias = "soilMoisture", alias = "soil_moisture_pct")]
    pub soil_moisture_pct: f64,

    /// Free-text condition (e.g., "light rain"); display only
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl WeatherSnapshot {
    /// Validate every numeric field, naming the first offending one
    pub fn validate(&self) -> Result<()> {
        validation::validate_weather(self)
    }
}

/// Fertilizer intensity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FertilizerTier {
    Low,
    Medium,
    High,
}

impl FertilizerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizerTier::Low => "Low",
            FertilizerTier::Medium => "Medium",
            FertilizerTier::High => "High",
        }
    }
}

impl fmt::Display for FertilizerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adjusted nutrient doses in kg/ha (whole numbers)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Npk {
    pub nitrogen_kg_ha: f64,
    pub phosphorus_kg_ha: f64,
    pub potassium_kg_ha: f64,
}

impl Npk {
    pub fn total(&self) -> f64 {
        self.nitrogen_kg_ha + self.phosphorus_kg_ha + self.potassium_kg_ha
    }
}

/// Format a dose for display, e.g. "72 kg/ha"
pub fn format_kg_ha(value: f64) -> String {
    format!("{:.0} kg/ha", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_accepts_provider_field_names() {
        let json = r#"{"temperature": 31.5, "rainfall": 4.0, "humidity": 82,
                       "soil_moisture": 48, "description": "light rain"}"#;
        let weather: WeatherSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(weather.temperature_c, 31.5);
        assert_eq!(weather.soil_moisture_pct, 48.0);
        assert_eq!(weather.condition.as_deref(), Some("light rain"));
    }

    #[test]
    fn test_weather_accepts_camel_case() {
        let json = r#"{"temperatureC": 28, "rainfallMm": 0, "humidityPct": 70,
                       "soilMoisturePct": 50}"#;
        let weather: WeatherSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(weather.rainfall_mm, 0.0);
        assert!(weather.condition.is_none());
    }

    #[test]
    fn test_soil_reading_rejects_out_of_range() {
        assert!(SoilReading::new(6.5).is_ok());
        assert!(SoilReading::new(3.9).is_err());
        assert!(SoilReading::new(f64::NAN).is_err());
    }

    #[test]
    fn test_format_kg_ha() {
        assert_eq!(format_kg_ha(72.0), "72 kg/ha");
        assert_eq!(format_kg_ha(104.0), "104 kg/ha");
    }
}
