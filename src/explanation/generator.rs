//! Deterministic explanation text for a recommendation.

use crate::catalog::{CropCategory, CropVariety};
use crate::engine::fertilizer::PH_EXTREME_HIGH;
use crate::engine::{Recommendation, WeatherSnapshot};
use crate::explanation::soil_ph::{check_variety_ph, PhStatus};
use crate::explanation::types::{Explanation, Severity, WarningCard};

/// Above this temperature the irrigation sentence mentions heat
const HIGH_TEMPERATURE_NOTE_C: f64 = 30.0;

/// Below this pH the summary recommends liming
const LIMING_PH: f64 = 6.0;

pub struct ExplanationGenerator;

impl ExplanationGenerator {
    /// Build the summary paragraph and warning cards
    pub fn generate(
        category: &CropCategory,
        variety: &CropVariety,
        recommendation: &Recommendation,
        soil_ph: f64,
        weather: &WeatherSnapshot,
    ) -> Explanation {
        let status = PhStatus::classify(soil_ph);

        let mut warnings = Vec::new();
        if let Some(card) = check_variety_ph(variety, soil_ph) {
            warnings.push(card);
        }
        if status.is_extreme() {
            warnings.push(WarningCard {
                warning_type: "ph_extreme".to_string(),
                severity: Severity::Medium,
                icon: "🚨".to_string(),
                message: format!("{} soil raises fertilizer demand", status.label()),
                detail: format!("Soil pH {:.1} is outside 5.5-7.5; doses are increased by 30%", soil_ph),
                advice: "Correct soil pH before the next season to cut fertilizer costs".to_string(),
            });
        }
        if recommendation.irrigation_needed && weather.temperature_c > HIGH_TEMPERATURE_NOTE_C {
            warnings.push(WarningCard {
                warning_type: "heat_stress".to_string(),
                severity: Severity::Low,
                icon: "⚠️".to_string(),
                message: "High temperature increases water demand".to_string(),
                detail: format!("Air temperature {}°C", weather.temperature_c),
                advice: "Irrigate early in the morning or late in the afternoon".to_string(),
            });
        }

        Explanation {
            ph_status: status.label().to_string(),
            summary: generate_summary(&category.name, recommendation, soil_ph, weather),
            warnings,
        }
    }
}

/// One paragraph covering pH, fertilizer tier and irrigation
pub fn generate_summary(
    crop_name: &str,
    recommendation: &Recommendation,
    soil_ph: f64,
    weather: &WeatherSnapshot,
) -> String {
    let moisture = weather.soil_moisture_pct;
    let rain = weather.rainfall_mm;

    let mut text = format!("Based on the analysis of your {} field conditions: ", crop_name);

    if soil_ph < LIMING_PH {
        text.push_str(&format!(
            "Your soil pH of {:.1} is slightly acidic, which may limit nutrient availability. \
             Consider applying lime to raise pH gradually. ",
            soil_ph
        ));
    } else if soil_ph > PH_EXTREME_HIGH {
        text.push_str(&format!(
            "Your soil pH of {:.1} is alkaline, which can affect micronutrient uptake. ",
            soil_ph
        ));
    } else {
        text.push_str(&format!(
            "Your soil pH of {:.1} is within the optimal range for {}. ",
            soil_ph, crop_name
        ));
    }

    text.push_str(&format!(
        "A {} fertilizer application is recommended based on crop requirements and current soil conditions. ",
        recommendation.fertilizer_tier.as_str().to_lowercase()
    ));

    if recommendation.irrigation_needed {
        text.push_str(&format!(
            "With soil moisture at {}% and recent rainfall of {}mm, irrigation is needed to support optimal {} growth",
            moisture, rain, crop_name
        ));
        if weather.temperature_c > HIGH_TEMPERATURE_NOTE_C {
            text.push_str(&format!(
                ", especially given the high temperature of {}°C which increases water demand.",
                weather.temperature_c
            ));
        } else {
            text.push('.');
        }
    } else {
        text.push_str(&format!(
            "Current moisture levels ({}%) combined with {}mm rainfall provide adequate water for your crop. \
             Monitor conditions and reassess in 2-3 days.",
            moisture, rain
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CropCatalog;
    use crate::engine::compute_recommendation;

    fn weather(temperature_c: f64, soil_moisture_pct: f64, rainfall_mm: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c,
            rainfall_mm,
            humidity_pct: 80.0,
            soil_moisture_pct,
            condition: None,
        }
    }

    fn explain(variety_id: &str, ph: f64, w: &WeatherSnapshot) -> Explanation {
        let catalog = CropCatalog::builtin();
        let variety = catalog.lookup_variety(variety_id).unwrap();
        let category = catalog.lookup_category(&variety.category).unwrap();
        let rec = compute_recommendation(&catalog, variety_id, ph, w).unwrap();
        ExplanationGenerator::generate(category, variety, &rec, ph, w)
    }

    #[test]
    fn test_optimal_ph_with_irrigation_in_heat() {
        let e = explain("rice_miniket", 6.5, &weather(33.0, 48.0, 2.5));
        assert_eq!(e.ph_status, "Good");
        assert!(e.summary.starts_with("Based on the analysis of your Rice field conditions: "));
        assert!(e.summary.contains("Your soil pH of 6.5 is within the optimal range for Rice."));
        assert!(e.summary.contains("A medium fertilizer application is recommended"));
        assert!(e.summary.contains("With soil moisture at 48% and recent rainfall of 2.5mm"));
        assert!(e.summary.ends_with("especially given the high temperature of 33°C which increases water demand."));
        assert!(e.warnings.iter().any(|w| w.warning_type == "heat_stress"));
    }

    #[test]
    fn test_acidic_soil_without_irrigation() {
        let e = explain("potato_diamant", 5.2, &weather(24.0, 70.0, 10.0));
        assert_eq!(e.ph_status, "Acidic");
        assert!(e.summary.contains("slightly acidic"));
        assert!(e.summary.contains("Consider applying lime"));
        assert!(e.summary.ends_with("Monitor conditions and reassess in 2-3 days."));
        assert!(e.warnings.iter().any(|w| w.warning_type == "ph_extreme"));
        // 5.2 is inside Diamant's 5.0-6.5 band
        assert!(!e.warnings.iter().any(|w| w.warning_type == "ph_incompatible"));
    }

    #[test]
    fn test_alkaline_soil() {
        let e = explain("wheat_prodip", 8.0, &weather(22.0, 30.0, 0.0));
        assert_eq!(e.ph_status, "Alkaline");
        assert!(e.summary.contains("is alkaline, which can affect micronutrient uptake."));
        assert!(e.summary.ends_with("support optimal Wheat growth."));
        assert!(e.warnings.iter().any(|w| w.warning_type == "ph_incompatible"));
    }
}
