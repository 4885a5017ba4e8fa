//! Crop Catalog
//!
//! Static, read-only table of crop categories and varieties. Built once at
//! startup (embedded table or JSON file) and shared immutably afterwards.
//!
//! ## Architecture
//! - `categories.rs` - CropCategory + base NPK / moisture threshold table
//! - `varieties.rs` - CropVariety + optimal pH band table
//! - `districts.rs` - Bangladesh district table used for location selection

pub mod categories;
pub mod varieties;
pub mod districts;

pub use categories::{CropCategory, DEFAULT_MOISTURE_THRESHOLD};
pub use varieties::CropVariety;
pub use districts::{District, Division, DEFAULT_LOCATION};

use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::validation;
use crate::error::AdvisorError;
use categories::CATEGORY_TABLE;
use varieties::VARIETY_TABLE;

/// On-disk shape of a catalog override file
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFile {
    pub categories: Vec<CropCategory>,
    pub varieties: Vec<CropVariety>,
}

/// Ordered crop categories and varieties with O(1) id lookups.
#[derive(Debug, Clone)]
pub struct CropCatalog {
    categories: Vec<CropCategory>,
    varieties: Vec<CropVariety>,
    category_index: FxHashMap<String, usize>,
    variety_index: FxHashMap<String, usize>,
}

impl CropCatalog {
    /// Catalog built from the embedded tables
    pub fn builtin() -> Self {
        Self::index(
            CATEGORY_TABLE.iter().map(CropCategory::from).collect(),
            VARIETY_TABLE.iter().map(CropVariety::from).collect(),
        )
    }

    /// Build a catalog from explicit parts, validating them first
    pub fn from_parts(categories: Vec<CropCategory>, varieties: Vec<CropVariety>) -> Result<Self> {
        let catalog = Self::index(categories, varieties);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file (`{"categories": [...], "varieties": [...]}`)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let file: CatalogFile = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse catalog JSON")?;

        Self::from_parts(file.categories, file.varieties)
            .with_context(|| format!("Invalid catalog in {:?}", path))
    }

    fn index(categories: Vec<CropCategory>, varieties: Vec<CropVariety>) -> Self {
        let category_index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let variety_index = varieties
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.clone(), i))
            .collect();

        CropCatalog { categories, varieties, category_index, variety_index }
    }

    /// Check table consistency: unique ids, known categories, sane numeric ranges
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                anyhow::bail!("Duplicate category id '{}'", category.id);
            }
            validation::validate_category(category)
                .with_context(|| format!("Category '{}' is invalid", category.id))?;
        }

        let mut seen = FxHashSet::default();
        for variety in &self.varieties {
            if !seen.insert(variety.id.as_str()) {
                anyhow::bail!("Duplicate variety id '{}'", variety.id);
            }
            if !self.category_index.contains_key(&variety.category) {
                anyhow::bail!(
                    "Variety '{}' references unknown category '{}'",
                    variety.id, variety.category
                );
            }
            if !(variety.min_ph <= variety.max_ph) {
                anyhow::bail!("Variety '{}' has min_ph above max_ph", variety.id);
            }
            if variety.min_ph < 4.0 || variety.max_ph > 9.0 {
                anyhow::bail!("Variety '{}' pH band outside [4, 9]", variety.id);
            }
        }

        Ok(())
    }

    pub fn lookup_variety(&self, id: &str) -> Result<&CropVariety, AdvisorError> {
        self.variety_index
            .get(id)
            .map(|&i| &self.varieties[i])
            .ok_or_else(|| AdvisorError::variety_not_found(id))
    }

    pub fn lookup_category(&self, id: &str) -> Result<&CropCategory, AdvisorError> {
        self.category_index
            .get(id)
            .map(|&i| &self.categories[i])
            .ok_or_else(|| AdvisorError::category_not_found(id))
    }

    /// Category profile, or the default profile for unknown ids
    pub fn category_or_default(&self, id: &str) -> CropCategory {
        match self.lookup_category(id) {
            Ok(category) => category.clone(),
            Err(_) => CropCategory::default_profile(id),
        }
    }

    /// Varieties of one category in declaration order
    ///
    /// Unknown category → `NotFound`; a known category with no varieties → empty.
    pub fn varieties_of(&self, category_id: &str) -> Result<Vec<&CropVariety>, AdvisorError> {
        self.lookup_category(category_id)?;
        Ok(self
            .varieties
            .iter()
            .filter(|v| v.category == category_id)
            .collect())
    }

    pub fn categories(&self) -> &[CropCategory] {
        &self.categories
    }

    pub fn varieties(&self) -> &[CropVariety] {
        &self.varieties
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = CropCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.categories().len(), 6);
    }

    #[test]
    fn test_lookup_variety() {
        let catalog = CropCatalog::builtin();
        let miniket = catalog.lookup_variety("rice_miniket").unwrap();
        assert_eq!(miniket.category, "rice");
        assert_eq!(miniket.optimal_range(), (6.0, 6.8));

        let err = catalog.lookup_variety("rice_imaginary").unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }

    #[test]
    fn test_varieties_of_preserves_declaration_order() {
        let catalog = CropCatalog::builtin();
        let ids: Vec<&str> = catalog
            .varieties_of("potato")
            .unwrap()
            .iter()
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(ids, vec!["potato_diamant", "potato_cardinal", "potato_granola"]);

        assert!(catalog.varieties_of("sugarcane").is_err());
    }

    #[test]
    fn test_category_or_default() {
        let catalog = CropCatalog::builtin();
        assert_eq!(catalog.category_or_default("rice").moisture_threshold, 70.0);
        assert_eq!(catalog.category_or_default("lentil").moisture_threshold, 50.0);
    }

    #[test]
    fn test_from_parts_rejects_orphan_variety() {
        let categories = vec![CropCategory::default_profile("rice")];
        let varieties = vec![CropVariety {
            id: "wheat_x".to_string(),
            category: "wheat".to_string(),
            name: "X".to_string(),
            min_ph: 6.0,
            max_ph: 7.0,
        }];
        let err = CropCatalog::from_parts(categories, varieties).unwrap_err();
        assert!(err.to_string().contains("unknown category 'wheat'"));
    }

    #[test]
    fn test_from_parts_rejects_inverted_band() {
        let categories = vec![CropCategory::default_profile("rice")];
        let varieties = vec![CropVariety {
            id: "rice_x".to_string(),
            category: "rice".to_string(),
            name: "X".to_string(),
            min_ph: 7.0,
            max_ph: 6.0,
        }];
        assert!(CropCatalog::from_parts(categories, varieties).is_err());
    }

    #[test]
    fn test_from_parts_rejects_duplicate_category() {
        let categories = vec![
            CropCategory::default_profile("rice"),
            CropCategory::default_profile("rice"),
        ];
        let err = CropCatalog::from_parts(categories, vec![]).unwrap_err();
        assert!(err.to_string().contains("Duplicate category id"));
    }

    #[test]
    fn test_catalog_file_round_trip_through_json() {
        let json = r#"{
            "categories": [
                {"id": "rice", "name": "Rice", "base_nitrogen": 80, "base_phosphorus": 40,
                 "base_potassium": 40, "moisture_threshold": 70}
            ],
            "varieties": [
                {"id": "rice_local", "category": "rice", "name": "Local", "min_ph": 5.5, "max_ph": 6.5}
            ]
        }"#;
        let file: CatalogFile = serde_json::from_str(json).unwrap();
        let catalog = CropCatalog::from_parts(file.categories, file.varieties).unwrap();
        assert_eq!(catalog.lookup_variety("rice_local").unwrap().name, "Local");
    }

    #[test]
    fn test_from_parts_rejects_non_finite_base() {
        let mut rice = CropCategory::default_profile("rice");
        rice.base_potassium = f64::INFINITY;
        let err = CropCatalog::from_parts(vec![rice], vec![]).unwrap_err();
        assert!(format!("{:#}", err).contains("base_potassium"));
    }
}
