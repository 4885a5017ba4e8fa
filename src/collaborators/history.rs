//! Recommendation history
//!
//! Append-only records keyed by user id, plus the dashboard summary computed
//! from them. The engine never reads history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::engine::FertilizerTier;
use crate::error::{AdvisorError, Result};

/// Number of records shown in the "recent" strip
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: u64,
    pub user_id: String,
    pub crop_type: String,
    pub variety_id: String,
    pub soil_ph: f64,
    pub location: String,
    pub fertilizer_tier: FertilizerTier,
    pub irrigation_needed: bool,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub soil_moisture_pct: f64,
    /// Advice text shown with the recommendation (may be the placeholder)
    pub advice: String,
    pub created_at: DateTime<Utc>,
}

/// Record fields supplied by the caller; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewHistoryRecord {
    pub user_id: String,
    pub crop_type: String,
    pub variety_id: String,
    pub soil_ph: f64,
    pub location: String,
    pub fertilizer_tier: FertilizerTier,
    pub irrigation_needed: bool,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub soil_moisture_pct: f64,
    pub advice: String,
}

pub trait HistoryStore: Send + Sync {
    fn append(&self, record: NewHistoryRecord) -> Result<HistoryRecord>;

    /// All records for a user, newest first
    fn list(&self, user_id: &str) -> Result<Vec<HistoryRecord>>;
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
    next_id: AtomicU64,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, record: NewHistoryRecord) -> Result<HistoryRecord> {
        let stored = HistoryRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            user_id: record.user_id,
            crop_type: record.crop_type,
            variety_id: record.variety_id,
            soil_ph: record.soil_ph,
            location: record.location,
            fertilizer_tier: record.fertilizer_tier,
            irrigation_needed: record.irrigation_needed,
            temperature_c: record.temperature_c,
            humidity_pct: record.humidity_pct,
            soil_moisture_pct: record.soil_moisture_pct,
            advice: record.advice,
            created_at: Utc::now(),
        };

        self.records
            .write()
            .map_err(|_| AdvisorError::upstream("history", "store lock poisoned"))?
            .push(stored.clone());

        Ok(stored)
    }

    fn list(&self, user_id: &str) -> Result<Vec<HistoryRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| AdvisorError::upstream("history", "store lock poisoned"))?;

        Ok(records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Dashboard summary of a user's history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStats {
    pub total_recommendations: usize,
    pub most_used_crop: Option<String>,
    pub last_activity: Option<DateTime<Utc>>,
    pub avg_soil_ph: Option<f64>,
    pub recent: Vec<HistoryRecord>,
}

impl HistoryStats {
    /// Summarize records given newest first
    ///
    /// Ties for most used crop go to the crop seen first (i.e. most recently used).
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        if records.is_empty() {
            return HistoryStats {
                total_recommendations: 0,
                most_used_crop: None,
                last_activity: None,
                avg_soil_ph: None,
                recent: Vec::new(),
            };
        }

        let mut counts: Vec<(&str, usize)> = Vec::new();
        for record in records {
            match counts.iter_mut().find(|(crop, _)| *crop == record.crop_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((&record.crop_type, 1)),
            }
        }

        let mut most_used: Option<(&str, usize)> = None;
        for &(crop, n) in &counts {
            if most_used.map_or(true, |(_, best)| n > best) {
                most_used = Some((crop, n));
            }
        }

        let total_ph: f64 = records.iter().map(|r| r.soil_ph).sum();

        HistoryStats {
            total_recommendations: records.len(),
            most_used_crop: most_used.map(|(crop, _)| crop.to_string()),
            last_activity: Some(records[0].created_at),
            avg_soil_ph: Some(total_ph / records.len() as f64),
            recent: records.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}
