//! Crop variety table with optimal soil pH bands
//!
//! Each variety names its category explicitly; ids are opaque keys.

use serde::{Deserialize, Serialize};

/// A cultivar within a crop category and the soil pH band it grows best in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropVariety {
    /// Stable key (e.g., "rice_miniket")
    pub id: String,

    /// Owning category id (e.g., "rice")
    pub category: String,

    /// Display name (e.g., "Miniket")
    pub name: String,

    /// Lower bound of the optimal pH band (inclusive)
    pub min_ph: f64,

    /// Upper bound of the optimal pH band (inclusive)
    pub max_ph: f64,
}

impl CropVariety {
    pub fn optimal_range(&self) -> (f64, f64) {
        (self.min_ph, self.max_ph)
    }
}

pub(crate) struct VarietyRow {
    pub id: &'static str,
    pub category: &'static str,
    pub name: &'static str,
    pub min_ph: f64,
    pub max_ph: f64,
}

impl From<&VarietyRow> for CropVariety {
    fn from(row: &VarietyRow) -> Self {
        CropVariety {
            id: row.id.to_string(),
            category: row.category.to_string(),
            name: row.name.to_string(),
            min_ph: row.min_ph,
            max_ph: row.max_ph,
        }
    }
}

// ============================================================================
// EMBEDDED VARIETY TABLE
// Grouped by category; order within a category is display order.
// ============================================================================

pub(crate) static VARIETY_TABLE: &[VarietyRow] = &[
    // Rice
    VarietyRow { id: "rice_miniket", category: "rice", name: "Miniket", min_ph: 6.0, max_ph: 6.8 },
    VarietyRow { id: "rice_brri28", category: "rice", name: "BRRI dhan28", min_ph: 5.5, max_ph: 6.5 },
    VarietyRow { id: "rice_brri29", category: "rice", name: "BRRI dhan29", min_ph: 5.5, max_ph: 7.0 },
    VarietyRow { id: "rice_nazirshail", category: "rice", name: "Nazirshail", min_ph: 5.5, max_ph: 6.5 },
    VarietyRow { id: "rice_kataribhog", category: "rice", name: "Kataribhog", min_ph: 6.0, max_ph: 7.0 },

    // Wheat
    VarietyRow { id: "wheat_bari26", category: "wheat", name: "BARI Gom 26", min_ph: 6.0, max_ph: 7.5 },
    VarietyRow { id: "wheat_bari30", category: "wheat", name: "BARI Gom 30", min_ph: 6.0, max_ph: 7.5 },
    VarietyRow { id: "wheat_prodip", category: "wheat", name: "Prodip", min_ph: 6.0, max_ph: 7.0 },

    // Maize
    VarietyRow { id: "maize_bari9", category: "maize", name: "BARI Hybrid Maize 9", min_ph: 5.8, max_ph: 7.0 },
    VarietyRow { id: "maize_shuvra", category: "maize", name: "Shuvra", min_ph: 5.5, max_ph: 7.5 },
    VarietyRow { id: "maize_khoi_bhutta", category: "maize", name: "Khoi Bhutta", min_ph: 5.5, max_ph: 7.0 },

    // Jute
    VarietyRow { id: "jute_tossa", category: "jute", name: "Tossa (O-9897)", min_ph: 6.0, max_ph: 7.5 },
    VarietyRow { id: "jute_deshi", category: "jute", name: "Deshi (CVL-1)", min_ph: 6.0, max_ph: 7.0 },
    VarietyRow { id: "jute_kenaf", category: "jute", name: "Kenaf (HC-95)", min_ph: 5.5, max_ph: 7.5 },

    // Potato
    VarietyRow { id: "potato_diamant", category: "potato", name: "Diamant", min_ph: 5.0, max_ph: 6.5 },
    VarietyRow { id: "potato_cardinal", category: "potato", name: "Cardinal", min_ph: 5.0, max_ph: 6.5 },
    VarietyRow { id: "potato_granola", category: "potato", name: "Granola", min_ph: 5.2, max_ph: 6.4 },

    // Banana
    VarietyRow { id: "banana_sagor", category: "banana", name: "Sagor", min_ph: 5.5, max_ph: 7.0 },
    VarietyRow { id: "banana_sabri", category: "banana", name: "Sabri", min_ph: 6.0, max_ph: 7.5 },
    VarietyRow { id: "banana_champa", category: "banana", name: "Champa", min_ph: 5.5, max_ph: 7.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_are_ordered_and_in_domain() {
        for row in VARIETY_TABLE {
            assert!(row.min_ph < row.max_ph, "{} has inverted band", row.id);
            assert!(row.min_ph >= 4.0 && row.max_ph <= 9.0, "{} out of domain", row.id);
        }
    }

    #[test]
    fn test_optimal_range() {
        let miniket = CropVariety::from(&VARIETY_TABLE[0]);
        assert_eq!(miniket.optimal_range(), (6.0, 6.8));
        assert_eq!(miniket.category, "rice");
    }
}
