// Engine properties checked across the whole built-in catalog
//
// Run with: cargo test --test recommendation_properties

use approx::assert_relative_eq;
use crop_advisor::catalog::CropCategory;
use crop_advisor::engine::fertilizer::{estimate, ph_multiplier};
use crop_advisor::engine::irrigation::{decide, decide_for_category_id};
use crop_advisor::engine::{check_compatibility, compute_recommendation, FertilizerTier, WeatherSnapshot};
use crop_advisor::{CropCatalog, CropVariety};

fn weather(temperature_c: f64, soil_moisture_pct: f64, rainfall_mm: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c,
        rainfall_mm,
        humidity_pct: 70.0,
        soil_moisture_pct,
        condition: None,
    }
}

/// pH values from 4.0 to 9.0 in 0.05 steps
fn ph_grid() -> Vec<f64> {
    (0..=100).map(|i| 4.0 + i as f64 / 20.0).collect()
}

#[test]
fn ph_multiplier_bands_hold_for_every_category() {
    let catalog = CropCatalog::builtin();

    for category in catalog.categories() {
        for ph in ph_grid() {
            let expected = if (6.0..=7.0).contains(&ph) {
                0.9
            } else if ph < 5.5 || ph > 7.5 {
                1.3
            } else {
                1.0
            };
            assert_relative_eq!(ph_multiplier(ph), expected);

            let est = estimate(category, ph, 28.0).unwrap();
            assert_relative_eq!(est.npk.phosphorus_kg_ha, (category.base_phosphorus * expected).round());
            assert_relative_eq!(est.npk.potassium_kg_ha, (category.base_potassium * expected).round());
        }
    }
}

#[test]
fn heat_lowers_nitrogen_for_every_category() {
    let catalog = CropCatalog::builtin();

    for category in catalog.categories() {
        let mild = estimate(category, 6.5, 28.0).unwrap();
        for t in [35.1, 38.0, 45.0] {
            let hot = estimate(category, 6.5, t).unwrap();
            assert!(
                hot.npk.nitrogen_kg_ha < mild.npk.nitrogen_kg_ha,
                "{} at {}°C: {} vs {}",
                category.id, t, hot.npk.nitrogen_kg_ha, mild.npk.nitrogen_kg_ha
            );
            assert_eq!(hot.npk.phosphorus_kg_ha, mild.npk.phosphorus_kg_ha);
        }
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let catalog = CropCatalog::builtin();
    let w = weather(31.0, 55.0, 12.5);

    for variety in catalog.varieties() {
        let a = compute_recommendation(&catalog, &variety.id, 6.3, &w).unwrap();
        let b = compute_recommendation(&catalog, &variety.id, 6.3, &w).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.npk.nitrogen_kg_ha.to_bits(), b.npk.nitrogen_kg_ha.to_bits());
    }
}

#[test]
fn rice_reference_case() {
    let catalog = CropCatalog::builtin();
    let rec = compute_recommendation(&catalog, "rice_miniket", 6.5, &weather(28.0, 75.0, 0.0)).unwrap();

    assert_relative_eq!(rec.npk.nitrogen_kg_ha, 72.0);
    assert_relative_eq!(rec.npk.phosphorus_kg_ha, 36.0);
    assert_relative_eq!(rec.npk.potassium_kg_ha, 36.0);
    assert_relative_eq!(rec.npk.total(), 144.0);
    assert_eq!(rec.fertilizer_tier, FertilizerTier::Medium);
    assert!(!rec.irrigation_needed);
}

#[test]
fn total_of_exactly_180_is_high() {
    // 100 + 40 + 40 at pH 5.8 (multiplier 1.0), 28°C
    let category = CropCategory {
        id: "test".to_string(),
        name: "Test".to_string(),
        base_nitrogen: 100.0,
        base_phosphorus: 40.0,
        base_potassium: 40.0,
        moisture_threshold: 50.0,
    };
    let est = estimate(&category, 5.8, 28.0).unwrap();
    assert_relative_eq!(est.npk.total(), 180.0);
    assert_eq!(est.tier, FertilizerTier::High);
}

#[test]
fn irrigation_reference_cases() {
    let catalog = CropCatalog::builtin();
    let rice = catalog.lookup_category("rice").unwrap();
    let wheat = catalog.lookup_category("wheat").unwrap();

    assert!(decide(rice, 50.0, 0.0, 28.0).unwrap());
    assert!(!decide(rice, 75.0, 0.0, 28.0).unwrap());

    assert!(decide(wheat, 52.0, 0.0, 33.0).unwrap());
    assert!(!decide(wheat, 52.0, 0.0, 30.0).unwrap());
}

#[test]
fn compatibility_bounds_are_inclusive() {
    let variety = CropVariety {
        id: "rice_band".to_string(),
        category: "rice".to_string(),
        name: "Band".to_string(),
        min_ph: 6.0,
        max_ph: 6.8,
    };
    assert!(check_compatibility(&variety, 6.0).is_compatible);
    assert!(check_compatibility(&variety, 6.8).is_compatible);
    assert!(!check_compatibility(&variety, 5.99).is_compatible);
    assert!(!check_compatibility(&variety, 6.81).is_compatible);
}

#[test]
fn incompatible_ph_still_yields_recommendation() {
    let catalog = CropCatalog::builtin();
    let rec = compute_recommendation(&catalog, "rice_miniket", 8.2, &weather(28.0, 60.0, 0.0)).unwrap();
    assert!(!rec.compatibility.is_compatible);
    assert_eq!(rec.fertilizer_tier, FertilizerTier::High);
}

#[test]
fn unknown_category_uses_default_threshold() {
    let catalog = CropCatalog::builtin();
    assert!(decide_for_category_id(&catalog, "coffee", 49.0, 0.0, 28.0).unwrap());
    assert!(!decide_for_category_id(&catalog, "coffee", 50.0, 0.0, 28.0).unwrap());
}

#[test]
fn invalid_inputs_name_the_field() {
    let catalog = CropCatalog::builtin();

    let err = compute_recommendation(&catalog, "rice_miniket", f64::NAN, &weather(28.0, 60.0, 0.0)).unwrap_err();
    assert_eq!(err.kind(), "InvalidInput");
    assert!(err.to_string().contains("soil_ph"));

    let err = compute_recommendation(&catalog, "rice_miniket", 6.5, &weather(28.0, 120.0, 0.0)).unwrap_err();
    assert!(err.to_string().contains("soil_moisture_pct"));

    let err = compute_recommendation(&catalog, "rice_miniket", 6.5, &weather(28.0, 60.0, -1.0)).unwrap_err();
    assert!(err.to_string().contains("rainfall_mm"));
}
