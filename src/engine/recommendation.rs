//! Combined recommendation
//!
//! Looks up the variety, validates inputs, then runs the compatibility check,
//! fertilizer estimate and irrigation decision independently.

use serde::Serialize;

use super::compatibility::{check_compatibility, Compatibility};
use super::fertilizer;
use super::irrigation;
use super::types::{FertilizerTier, Npk, SoilReading, WeatherSnapshot};
use crate::catalog::CropCatalog;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub variety_id: String,
    pub category_id: String,
    pub fertilizer_tier: FertilizerTier,
    pub npk: Npk,
    pub irrigation_needed: bool,
    /// Advisory only; an incompatible pH still yields a full recommendation
    pub compatibility: Compatibility,
    pub effective_moisture: f64,
    pub adjusted_moisture_threshold: f64,
}

/// Compute the recommendation for one variety, soil pH and weather snapshot
pub fn compute_recommendation(
    catalog: &CropCatalog,
    variety_id: &str,
    soil_ph: f64,
    weather: &WeatherSnapshot,
) -> Result<Recommendation> {
    let variety = catalog.lookup_variety(variety_id)?;
    let soil = SoilReading::new(soil_ph)?;
    weather.validate()?;

    let category = catalog.lookup_category(&variety.category)?;

    let compatibility = check_compatibility(variety, soil.ph());
    let estimate = fertilizer::estimate(category, soil.ph(), weather.temperature_c)?;
    let decision = irrigation::evaluate(
        category.moisture_threshold,
        weather.soil_moisture_pct,
        weather.rainfall_mm,
        weather.temperature_c,
    )?;

    tracing::debug!(
        "Recommendation for {} (pH {:.1}): {} fertilizer, irrigation {}",
        variety.id, soil.ph(), estimate.tier,
        if decision.irrigation_needed { "needed" } else { "not needed" }
    );

    Ok(Recommendation {
        variety_id: variety.id.clone(),
        category_id: category.id.clone(),
        fertilizer_tier: estimate.tier,
        npk: estimate.npk,
        irrigation_needed: decision.irrigation_needed,
        compatibility,
        effective_moisture: decision.effective_moisture,
        adjusted_moisture_threshold: decision.adjusted_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compatibility::PhFit;

    fn weather(temperature_c: f64, soil_moisture_pct: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c,
            rainfall_mm: 0.0,
            humidity_pct: 75.0,
            soil_moisture_pct,
            condition: None,
        }
    }

    #[test]
    fn test_miniket_recommendation() {
        let catalog = CropCatalog::builtin();
        let rec = compute_recommendation(&catalog, "rice_miniket", 6.5, &weather(28.0, 50.0)).unwrap();
        assert_eq!(rec.category_id, "rice");
        assert_eq!(rec.fertilizer_tier, FertilizerTier::Medium);
        assert_eq!(rec.npk.nitrogen_kg_ha, 72.0);
        assert!(rec.irrigation_needed);
        assert!(rec.compatibility.is_compatible);
    }

    #[test]
    fn test_incompatible_ph_still_recommends() {
        let catalog = CropCatalog::builtin();
        let rec = compute_recommendation(&catalog, "rice_miniket", 5.0, &weather(28.0, 80.0)).unwrap();
        assert!(!rec.compatibility.is_compatible);
        assert_eq!(rec.compatibility.fit, PhFit::BelowRange);
        // pH 5.0 → ×1.3: N104 P52 K52 = 208
        assert_eq!(rec.fertilizer_tier, FertilizerTier::High);
        assert!(!rec.irrigation_needed);
    }

    #[test]
    fn test_unknown_variety_is_not_found() {
        let catalog = CropCatalog::builtin();
        let err = compute_recommendation(&catalog, "rice", 6.5, &weather(28.0, 50.0)).unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }

    #[test]
    fn test_invalid_weather_is_rejected() {
        let catalog = CropCatalog::builtin();
        let err = compute_recommendation(&catalog, "rice_miniket", 6.5, &weather(28.0, f64::NAN))
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");
    }

    #[test]
    fn test_deterministic() {
        let catalog = CropCatalog::builtin();
        let w = weather(33.5, 41.0);
        let a = compute_recommendation(&catalog, "wheat_bari26", 7.8, &w).unwrap();
        let b = compute_recommendation(&catalog, "wheat_bari26", 7.8, &w).unwrap();
        assert_eq!(a, b);
    }
}
