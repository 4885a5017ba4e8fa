//! Variety / soil pH compatibility
//!
//! Compares a soil pH against a variety's optimal band. The result is
//! advisory: it annotates a recommendation but never blocks it.

use serde::Serialize;

use crate::catalog::CropVariety;

/// Where the soil pH sits relative to the variety's band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhFit {
    /// pH < min_ph (too acidic for this variety)
    BelowRange,
    /// min_ph <= pH <= max_ph
    WithinRange,
    /// pH > max_ph (too alkaline for this variety)
    AboveRange,
}

impl PhFit {
    pub fn display_text(&self) -> &'static str {
        match self {
            PhFit::BelowRange => "More acidic than this variety prefers",
            PhFit::WithinRange => "Within the optimal range",
            PhFit::AboveRange => "More alkaline than this variety prefers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compatibility {
    pub is_compatible: bool,
    pub optimal_range: (f64, f64),
    pub fit: PhFit,
    /// pH units to the nearest band edge (0 when within range)
    pub distance_from_range: f64,
}

/// Check a soil pH against a variety's optimal band (bounds inclusive)
pub fn check_compatibility(variety: &CropVariety, ph: f64) -> Compatibility {
    let (min_ph, max_ph) = variety.optimal_range();

    let (fit, distance) = if ph < min_ph {
        (PhFit::BelowRange, min_ph - ph)
    } else if ph > max_ph {
        (PhFit::AboveRange, ph - max_ph)
    } else {
        (PhFit::WithinRange, 0.0)
    };

    Compatibility {
        is_compatible: ph >= min_ph && ph <= max_ph,
        optimal_range: (min_ph, max_ph),
        fit,
        distance_from_range: distance,
    }
}
