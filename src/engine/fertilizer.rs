//! Fertilizer estimation
//!
//! Adjusts a category's base NPK for soil pH and (nitrogen only) air
//! temperature, rounds each dose to whole kg/ha, and classifies the total
//! into a tier.
//!
//! ```text
//! N = round(base_n * ph_mult * temp_mult)
//! P = round(base_p * ph_mult)
//! K = round(base_k * ph_mult)
//! total < 100 → Low, 100 ≤ total < 180 → Medium, total ≥ 180 → High
//! ```

use serde::Serialize;

use super::types::{FertilizerTier, Npk};
use super::validation;
use crate::catalog::CropCategory;
use crate::error::Result;

// pH bands
pub const PH_EXTREME_LOW: f64 = 5.5;
pub const PH_EXTREME_HIGH: f64 = 7.5;
pub const PH_OPTIMAL_MIN: f64 = 6.0;
pub const PH_OPTIMAL_MAX: f64 = 7.0;

pub const PH_MULT_EXTREME: f64 = 1.3;
pub const PH_MULT_OPTIMAL: f64 = 0.9;
pub const PH_MULT_NEUTRAL: f64 = 1.0;

// Nitrogen uptake efficiency by temperature
pub const TEMP_HOT_C: f64 = 35.0;
pub const TEMP_COLD_C: f64 = 20.0;
pub const TEMP_MULT_HOT: f64 = 0.8;
pub const TEMP_MULT_COLD: f64 = 0.85;
pub const TEMP_MULT_NEUTRAL: f64 = 1.0;

// Tier bands (lower bound inclusive)
pub const TIER_MEDIUM_MIN: f64 = 100.0;
pub const TIER_HIGH_MIN: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FertilizerEstimate {
    pub tier: FertilizerTier,
    pub npk: Npk,
}

/// 1.3 for extreme pH, 0.9 for the optimal band, 1.0 otherwise
pub fn ph_multiplier(ph: f64) -> f64 {
    if ph < PH_EXTREME_LOW || ph > PH_EXTREME_HIGH {
        PH_MULT_EXTREME
    } else if (PH_OPTIMAL_MIN..=PH_OPTIMAL_MAX).contains(&ph) {
        PH_MULT_OPTIMAL
    } else {
        PH_MULT_NEUTRAL
    }
}

/// 0.8 above 35 °C, 0.85 below 20 °C, 1.0 otherwise (applies to nitrogen only)
pub fn temperature_multiplier(temperature_c: f64) -> f64 {
    if temperature_c > TEMP_HOT_C {
        TEMP_MULT_HOT
    } else if temperature_c < TEMP_COLD_C {
        TEMP_MULT_COLD
    } else {
        TEMP_MULT_NEUTRAL
    }
}

pub fn classify_tier(total_kg_ha: f64) -> FertilizerTier {
    if total_kg_ha < TIER_MEDIUM_MIN {
        FertilizerTier::Low
    } else if total_kg_ha < TIER_HIGH_MIN {
        FertilizerTier::Medium
    } else {
        FertilizerTier::High
    }
}

/// Estimate adjusted NPK doses and the fertilizer tier
///
/// `f64::round` rounds half away from zero.
pub fn estimate(category: &CropCategory, ph: f64, temperature_c: f64) -> Result<FertilizerEstimate> {
    validation::validate_category(category)?;
    validation::validate_ph(ph)?;
    validation::validate_temperature(temperature_c)?;

    let ph_mult = ph_multiplier(ph);
    let temp_mult = temperature_multiplier(temperature_c);

    let npk = Npk {
        nitrogen_kg_ha: (category.base_nitrogen * ph_mult * temp_mult).round(),
        phosphorus_kg_ha: (category.base_phosphorus * ph_mult).round(),
        potassium_kg_ha: (category.base_potassium * ph_mult).round(),
    };
    let tier = classify_tier(npk.total());

    tracing::debug!(
        "Fertilizer estimate for {}: pH x{} temp x{} -> N{} P{} K{} ({})",
        category.id, ph_mult, temp_mult,
        npk.nitrogen_kg_ha, npk.phosphorus_kg_ha, npk.potassium_kg_ha, tier
    );

    Ok(FertilizerEstimate { tier, npk })
}
