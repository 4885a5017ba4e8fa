// Axum API server
//
// Exposes the recommendation engine and its collaborators (weather, advice,
// history) over JSON. Engine calls are synchronous and cheap; batch requests
// fan out with rayon on the blocking pool.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use anyhow::Context;

use crate::catalog::districts::{resolve_location, DISTRICTS};
use crate::catalog::{CropCatalog, CropCategory, CropVariety};
use crate::collaborators::{
    advice_or_placeholder, AdviceContext, AdviceGenerator, ChatCompletionAdvisor, HistoryRecord,
    HistoryStats, HistoryStore, HttpWeatherProvider, InMemoryHistoryStore, Language,
    NewHistoryRecord, WeatherProvider,
};
use crate::config::ServerConfig;
use crate::engine::{compute_recommendation, format_kg_ha, FertilizerTier, Recommendation, SoilReading, WeatherSnapshot};
use crate::error::AdvisorError;
use crate::explanation::{Explanation, ExplanationGenerator};

const WEATHER_CACHE_CAPACITY: u64 = 1_000;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CropCatalog>,
    pub weather: Arc<dyn WeatherProvider>,
    pub advisor: Arc<dyn AdviceGenerator>,
    pub history: Arc<dyn HistoryStore>,
    /// Weather snapshots keyed by lowercase location
    pub weather_cache: Cache<String, WeatherSnapshot>,
}

impl AppState {
    /// Build state from configuration: catalog, HTTP collaborators, in-memory history
    pub async fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                tracing::info!("Loading crop catalog from {}...", path.display());
                CropCatalog::load(path)?
            }
            None => {
                tracing::info!("Using built-in crop catalog...");
                CropCatalog::builtin()
            }
        };
        tracing::info!(
            "Catalog ready: {} categories, {} varieties",
            catalog.categories().len(),
            catalog.varieties().len()
        );

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let weather = HttpWeatherProvider::new(client.clone(), &config.weather_api_url);
        let advisor = ChatCompletionAdvisor::new(
            client,
            &config.advice_api_url,
            config.advice_api_key.clone(),
            &config.advice_model,
        );

        Ok(Self::with_collaborators(
            catalog,
            Arc::new(weather),
            Arc::new(advisor),
            Arc::new(InMemoryHistoryStore::new()),
            config.weather_cache_ttl,
        ))
    }

    /// Build state around explicit collaborators (used by tests and embedders)
    pub fn with_collaborators(
        catalog: CropCatalog,
        weather: Arc<dyn WeatherProvider>,
        advisor: Arc<dyn AdviceGenerator>,
        history: Arc<dyn HistoryStore>,
        weather_cache_ttl: Duration,
    ) -> Self {
        let weather_cache = Cache::builder()
            .max_capacity(WEATHER_CACHE_CAPACITY)
            .time_to_live(weather_cache_ttl)
            .build();

        Self {
            catalog: Arc::new(catalog),
            weather,
            advisor,
            history,
            weather_cache,
        }
    }

    /// Current weather for a resolved location, served from cache when fresh
    pub async fn weather_for(&self, location: &str) -> Result<WeatherSnapshot, AdvisorError> {
        let key = location.to_lowercase();
        if let Some(cached) = self.weather_cache.get(&key).await {
            tracing::debug!("Weather cache hit for {}", location);
            return Ok(cached);
        }

        let snapshot = self.weather.get_weather(location).await?;
        self.weather_cache.insert(key, snapshot.clone()).await;
        Ok(snapshot)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Catalog
        .route("/api/crops", get(list_crops))
        .route("/api/crops/:category/varieties", get(list_varieties))
        .route("/api/varieties/:id", get(get_variety))
        .route("/api/districts", get(list_districts))

        // Weather passthrough (cached)
        .route("/api/weather", get(get_weather))

        // Recommendations
        .route("/api/recommendations", post(recommend))
        .route("/api/recommendations/batch", post(recommend_batch))
        .route("/api/recommendations/with-weather", post(recommend_with_weather))

        // History
        .route("/api/history/:user_id", get(get_history))
        .route("/api/history/:user_id/stats", get(get_history_stats))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(rename = "varietyId")]
    pub variety_id: String,
    #[serde(rename = "soilPH")]
    pub soil_ph: f64,
    pub weather: WeatherSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct BatchRecommendationRequest {
    pub requests: Vec<RecommendationRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecommendationRequest {
    pub variety_id: String,
    #[serde(rename = "soilPH")]
    pub soil_ph: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityView {
    pub is_compatible: bool,
    pub optimal_range: String,
    pub fit: String,
    pub distance_from_range: f64,
}

/// Doses formatted as "<n> kg/ha"
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpkView {
    pub nitrogen_kg_ha: String,
    pub phosphorus_kg_ha: String,
    pub potassium_kg_ha: String,
}

/// Recommendation as presented to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub variety_id: String,
    pub category_id: String,
    pub fertilizer_tier: FertilizerTier,
    pub npk: NpkView,
    pub irrigation_needed: bool,
    pub compatibility: CompatibilityView,
    pub effective_moisture: f64,
    pub adjusted_moisture_threshold: f64,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(rec: &Recommendation) -> Self {
        let (min_ph, max_ph) = rec.compatibility.optimal_range;
        RecommendationResponse {
            variety_id: rec.variety_id.clone(),
            category_id: rec.category_id.clone(),
            fertilizer_tier: rec.fertilizer_tier,
            npk: NpkView {
                nitrogen_kg_ha: format_kg_ha(rec.npk.nitrogen_kg_ha),
                phosphorus_kg_ha: format_kg_ha(rec.npk.phosphorus_kg_ha),
                potassium_kg_ha: format_kg_ha(rec.npk.potassium_kg_ha),
            },
            irrigation_needed: rec.irrigation_needed,
            compatibility: CompatibilityView {
                is_compatible: rec.compatibility.is_compatible,
                optimal_range: format!("{:.1} - {:.1}", min_ph, max_ph),
                fit: rec.compatibility.fit.display_text().to_string(),
                distance_from_range: rec.compatibility.distance_from_range,
            },
            effective_moisture: rec.effective_moisture,
            adjusted_moisture_threshold: rec.adjusted_moisture_threshold,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchItem {
    Ok { recommendation: RecommendationResponse },
    Error { kind: String, message: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecommendationResponse {
    pub location: String,
    pub recommendation: RecommendationResponse,
    pub weather: WeatherSnapshot,
    pub explanation: Explanation,
    pub advice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<u64>,
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropCategory>> {
    Json(state.catalog.categories().to_vec())
}

async fn list_varieties(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<CropVariety>>, AppError> {
    let varieties = state.catalog.varieties_of(&category)?;
    Ok(Json(varieties.into_iter().cloned().collect()))
}

async fn get_variety(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CropVariety>, AppError> {
    Ok(Json(state.catalog.lookup_variety(&id)?.clone()))
}

async fn list_districts() -> impl IntoResponse {
    Json(DISTRICTS)
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let location = resolve_location(query.location.as_deref().unwrap_or(""));
    let weather = state.weather_for(&location).await?;

    Ok(Json(serde_json::json!({
        "location": location,
        "weather": weather,
    })))
}

async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(req) = payload?;
    let rec = compute_recommendation(&state.catalog, &req.variety_id, req.soil_ph, &req.weather)?;

    tracing::info!(
        "Recommendation {} pH {:.1}: {} fertilizer, irrigation {}",
        rec.variety_id, req.soil_ph, rec.fertilizer_tier, rec.irrigation_needed
    );

    Ok(Json(RecommendationResponse::from(&rec)))
}

/// Batch recommendations; each item succeeds or fails independently
///
/// POST /api/recommendations/batch
async fn recommend_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRecommendationRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    use rayon::prelude::*;

    let Json(req) = payload?;

    let start = std::time::Instant::now();
    let count = req.requests.len();
    tracing::info!("Batch recommendation for {} requests", count);

    let catalog = state.catalog.clone();

    // Use spawn_blocking to run Rayon on a blocking thread pool
    let results = tokio::task::spawn_blocking(move || {
        req.requests
            .par_iter()
            .map(|item| {
                match compute_recommendation(&catalog, &item.variety_id, item.soil_ph, &item.weather) {
                    Ok(rec) => BatchItem::Ok { recommendation: RecommendationResponse::from(&rec) },
                    Err(e) => BatchItem::Error { kind: e.kind().to_string(), message: e.to_string() },
                }
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Rayon task failed: {}", e)))?;

    let failed = results.iter().filter(|r| matches!(r, BatchItem::Error { .. })).count();
    tracing::info!("  Batch done in {:?} ({} ok, {} failed)", start.elapsed(), count - failed, failed);

    Ok(Json(serde_json::json!({
        "results": results,
        "total": count,
        "failed": failed,
    })))
}

/// Full flow: weather lookup, recommendation, explanation, advice, history
///
/// POST /api/recommendations/with-weather
async fn recommend_with_weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherRecommendationRequest>, JsonRejection>,
) -> Result<Json<WeatherRecommendationResponse>, AppError> {
    let Json(req) = payload?;

    // Reject bad input before calling out to the weather service
    let variety = state.catalog.lookup_variety(&req.variety_id)?;
    let soil = SoilReading::new(req.soil_ph)?;
    let category = state.catalog.lookup_category(&variety.category)?;

    let location = resolve_location(req.location.as_deref().unwrap_or(""));
    let weather = state.weather_for(&location).await?;

    let rec = compute_recommendation(&state.catalog, &variety.id, soil.ph(), &weather)?;
    let explanation = ExplanationGenerator::generate(category, variety, &rec, soil.ph(), &weather);

    let context = AdviceContext {
        crop_type: category.id.clone(),
        variety: variety.name.clone(),
        soil_ph: soil.ph(),
        location: location.clone(),
        weather: weather.clone(),
        fertilizer_tier: rec.fertilizer_tier,
        irrigation_needed: rec.irrigation_needed,
        language: req.language,
    };
    let advice = advice_or_placeholder(state.advisor.as_ref(), &context).await;

    let history_id = match req.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(user_id) => {
            let record = NewHistoryRecord {
                user_id: user_id.to_string(),
                crop_type: category.id.clone(),
                variety_id: variety.id.clone(),
                soil_ph: soil.ph(),
                location: location.clone(),
                fertilizer_tier: rec.fertilizer_tier,
                irrigation_needed: rec.irrigation_needed,
                temperature_c: weather.temperature_c,
                humidity_pct: weather.humidity_pct,
                soil_moisture_pct: weather.soil_moisture_pct,
                advice: advice.clone(),
            };
            match state.history.append(record) {
                Ok(stored) => Some(stored.id),
                Err(e) => {
                    tracing::warn!("Failed to save history for {}: {}", user_id, e);
                    None
                }
            }
        }
        None => None,
    };

    tracing::info!(
        "Recommendation {} at {} pH {:.1}: {} fertilizer, irrigation {}",
        variety.id, location, soil.ph(), rec.fertilizer_tier, rec.irrigation_needed
    );

    Ok(Json(WeatherRecommendationResponse {
        location,
        recommendation: RecommendationResponse::from(&rec),
        weather,
        explanation,
        advice,
        history_id,
    }))
}

async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<HistoryRecord>>, AppError> {
    Ok(Json(state.history.list(&user_id)?))
}

async fn get_history_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryStats>, AppError> {
    let records = state.history.list(&user_id)?;
    Ok(Json(HistoryStats::from_records(&records)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Advisor(AdvisorError),
    Internal(String),
}

impl From<AdvisorError> for AppError {
    fn from(e: AdvisorError) -> Self {
        AppError::Advisor(e)
    }
}

/// Malformed or mistyped request bodies are client input errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Advisor(AdvisorError::invalid("body", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind, message) = match self {
            AppError::Advisor(e) => {
                let status = match &e {
                    AdvisorError::NotFound { .. } => StatusCode::NOT_FOUND,
                    AdvisorError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    AdvisorError::UpstreamUnavailable { .. } => {
                        tracing::warn!("Upstream failure: {}", e);
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, e.kind(), e.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal", msg)
            }
        };

        let body = Json(serde_json::json!({
            "kind": kind,
            "message": message
        }));

        (status, body).into_response()
    }
}
