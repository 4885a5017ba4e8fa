use crate::catalog::CropVariety;
use crate::engine::compatibility::{check_compatibility, PhFit};
use crate::engine::fertilizer::{PH_EXTREME_HIGH, PH_EXTREME_LOW, PH_OPTIMAL_MAX, PH_OPTIMAL_MIN};
use crate::explanation::types::{Severity, WarningCard};

/// Coarse soil pH label shown next to the pH input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhStatus {
    /// pH < 5.5
    Acidic,
    /// pH > 7.5
    Alkaline,
    /// 6.0 ≤ pH ≤ 7.0
    Optimal,
    /// Everything in between
    Acceptable,
}

impl PhStatus {
    pub fn classify(ph: f64) -> Self {
        if ph < PH_EXTREME_LOW {
            PhStatus::Acidic
        } else if ph > PH_EXTREME_HIGH {
            PhStatus::Alkaline
        } else if (PH_OPTIMAL_MIN..=PH_OPTIMAL_MAX).contains(&ph) {
            PhStatus::Optimal
        } else {
            PhStatus::Acceptable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhStatus::Acidic => "Acidic",
            PhStatus::Alkaline => "Alkaline",
            PhStatus::Optimal => "Good",
            PhStatus::Acceptable => "OK",
        }
    }

    pub fn is_extreme(&self) -> bool {
        matches!(self, PhStatus::Acidic | PhStatus::Alkaline)
    }
}

/// Check soil pH against a variety's optimal band
///
/// Returns a warning if the pH is outside the band (inclusive bounds)
pub fn check_variety_ph(variety: &CropVariety, ph: f64) -> Option<WarningCard> {
    let compat = check_compatibility(variety, ph);
    if compat.is_compatible {
        return None;
    }

    let (min_ph, max_ph) = compat.optimal_range;
    let advice = match compat.fit {
        PhFit::BelowRange => "Apply agricultural lime in split doses to raise pH gradually",
        _ => "Add organic matter or gypsum and avoid alkaline amendments",
    };

    Some(WarningCard {
        warning_type: "ph_incompatible".to_string(),
        severity: Severity::from_ph_distance(compat.distance_from_range),
        icon: "⚠️".to_string(),
        message: format!("{} for {}", compat.fit.display_text(), variety.name),
        detail: format!(
            "Soil pH {:.1}, optimal range {:.1}-{:.1} ({:.1} units outside)",
            ph, min_ph, max_ph, compat.distance_from_range
        ),
        advice: advice.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn miniket() -> CropVariety {
        CropVariety {
            id: "rice_miniket".to_string(),
            category: "rice".to_string(),
            name: "Miniket".to_string(),
            min_ph: 6.0,
            max_ph: 6.8,
        }
    }

    #[test]
    fn test_ph_status_labels() {
        assert_eq!(PhStatus::classify(5.2).label(), "Acidic");
        assert_eq!(PhStatus::classify(7.8).label(), "Alkaline");
        assert_eq!(PhStatus::classify(6.5).label(), "Good");
        assert_eq!(PhStatus::classify(5.7).label(), "OK");
        assert_eq!(PhStatus::classify(7.3).label(), "OK");
    }

    #[test]
    fn test_compatible_ph() {
        assert!(check_variety_ph(&miniket(), 6.4).is_none());
        assert!(check_variety_ph(&miniket(), 6.8).is_none());
    }

    #[test]
    fn test_incompatible_ph() {
        let w = check_variety_ph(&miniket(), 4.8).unwrap();
        assert_eq!(w.warning_type, "ph_incompatible");
        assert_eq!(w.severity, Severity::High);
        assert!(w.detail.contains("6.0-6.8"));
        assert!(w.advice.contains("lime"));

        let w = check_variety_ph(&miniket(), 7.0).unwrap();
        assert_eq!(w.severity, Severity::Low);
        assert!(w.message.contains("alkaline"));
    }
}
