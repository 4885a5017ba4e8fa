//! Crop category rule table
//!
//! Per-category base NPK requirements (kg/ha) and the soil-moisture threshold
//! (%) below which irrigation is advised. Every arithmetic constant the
//! fertilizer and irrigation rules depend on per crop lives here.

use serde::{Deserialize, Serialize};

/// Moisture threshold (%) used when a category id is not in the catalog
pub const DEFAULT_MOISTURE_THRESHOLD: f64 = 50.0;

/// Base NPK (kg/ha) used when a category id is not in the catalog
pub const DEFAULT_BASE_NITROGEN: f64 = 60.0;
pub const DEFAULT_BASE_PHOSPHORUS: f64 = 40.0;
pub const DEFAULT_BASE_POTASSIUM: f64 = 40.0;

/// A crop category with its fertilizer and irrigation baselines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCategory {
    /// Stable key (e.g., "rice")
    pub id: String,

    /// Display name (e.g., "Rice")
    pub name: String,

    /// Base nitrogen requirement (kg/ha)
    pub base_nitrogen: f64,

    /// Base phosphorus requirement (kg/ha)
    pub base_phosphorus: f64,

    /// Base potassium requirement (kg/ha)
    pub base_potassium: f64,

    /// Effective soil moisture (%) below which irrigation is needed
    pub moisture_threshold: f64,
}

impl CropCategory {
    /// Profile applied to category ids that are not in the catalog
    pub fn default_profile(id: &str) -> Self {
        CropCategory {
            id: id.to_string(),
            name: id.to_string(),
            base_nitrogen: DEFAULT_BASE_NITROGEN,
            base_phosphorus: DEFAULT_BASE_PHOSPHORUS,
            base_potassium: DEFAULT_BASE_POTASSIUM,
            moisture_threshold: DEFAULT_MOISTURE_THRESHOLD,
        }
    }
}

/// Row of the embedded category table
pub(crate) struct CategoryRow {
    pub id: &'static str,
    pub name: &'static str,
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub moisture_threshold: f64,
}

impl From<&CategoryRow> for CropCategory {
    fn from(row: &CategoryRow) -> Self {
        CropCategory {
            id: row.id.to_string(),
            name: row.name.to_string(),
            base_nitrogen: row.n,
            base_phosphorus: row.p,
            base_potassium: row.k,
            moisture_threshold: row.moisture_threshold,
        }
    }
}

// ============================================================================
// EMBEDDED CATEGORY TABLE (declaration order is display order)
// ============================================================================

pub(crate) static CATEGORY_TABLE: &[CategoryRow] = &[
    CategoryRow { id: "rice", name: "Rice", n: 80.0, p: 40.0, k: 40.0, moisture_threshold: 70.0 },
    CategoryRow { id: "wheat", name: "Wheat", n: 60.0, p: 30.0, k: 30.0, moisture_threshold: 45.0 },
    CategoryRow { id: "maize", name: "Maize", n: 100.0, p: 50.0, k: 50.0, moisture_threshold: 50.0 },
    CategoryRow { id: "jute", name: "Jute", n: 40.0, p: 20.0, k: 30.0, moisture_threshold: 60.0 },
    CategoryRow { id: "potato", name: "Potato", n: 70.0, p: 60.0, k: 80.0, moisture_threshold: 55.0 },
    // Heavy potassium feeder
    CategoryRow { id: "banana", name: "Banana", n: 100.0, p: 40.0, k: 120.0, moisture_threshold: 60.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        let ids: Vec<&str> = CATEGORY_TABLE.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["rice", "wheat", "maize", "jute", "potato", "banana"]);
    }

    #[test]
    fn test_default_profile() {
        let profile = CropCategory::default_profile("sugarcane");
        assert_eq!(profile.id, "sugarcane");
        assert_eq!(profile.moisture_threshold, 50.0);
        assert_eq!(profile.base_nitrogen, 60.0);
        assert_eq!(profile.base_phosphorus, 40.0);
        assert_eq!(profile.base_potassium, 40.0);
    }
}
