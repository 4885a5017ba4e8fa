use serde::{Deserialize, Serialize};

/// Explanation attached to a recommendation for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub ph_status: String,   // "Acidic" / "Alkaline" / "Good" / "OK"
    pub summary: String,
    pub warnings: Vec<WarningCard>,
}

/// Warning card for conditions the farmer should act on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningCard {
    pub warning_type: String, // "ph_incompatible", "ph_extreme", "heat_stress"
    pub severity: Severity,
    pub icon: String, // "⚠️", "🚨"
    pub message: String,
    pub detail: String,
    pub advice: String,
}

/// Severity level for warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Derive severity from how far (pH units) a reading sits outside a band
    pub fn from_ph_distance(distance: f64) -> Self {
        match distance {
            d if d >= 1.0 => Severity::High,
            d if d >= 0.5 => Severity::Medium,
            d if d > 0.0 => Severity::Low,
            _ => Severity::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_ph_distance() {
        assert_eq!(Severity::from_ph_distance(0.0), Severity::Info);
        assert_eq!(Severity::from_ph_distance(0.2), Severity::Low);
        assert_eq!(Severity::from_ph_distance(0.5), Severity::Medium);
        assert_eq!(Severity::from_ph_distance(1.4), Severity::High);
    }
}
