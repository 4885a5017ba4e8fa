//! Weather provider client
//!
//! Fetches current conditions for a location from the weather service:
//! `GET {base_url}/weather?location=<name>` returning
//! `{temperature, rainfall, humidity, soil_moisture, description}`.
//! Any transport, status or decoding failure is `UpstreamUnavailable`.

use serde::Deserialize;

use super::BoxFuture;
use crate::engine::WeatherSnapshot;
use crate::error::{AdvisorError, Result};

const SERVICE: &str = "weather";

pub trait WeatherProvider: Send + Sync {
    fn get_weather<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<WeatherSnapshot>>;
}

// ============================================================================
// Weather API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WeatherApiResponse {
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub soil_moisture: Option<f64>,
    pub description: Option<String>,
}

impl WeatherApiResponse {
    /// Convert to a validated snapshot
    pub fn into_snapshot(self) -> Result<WeatherSnapshot> {
        let soil_moisture_pct = self
            .soil_moisture
            .ok_or_else(|| AdvisorError::upstream(SERVICE, "response missing soil_moisture"))?;

        let snapshot = WeatherSnapshot {
            temperature_c: self.temperature,
            rainfall_mm: self.rainfall,
            humidity_pct: self.humidity,
            soil_moisture_pct,
            condition: self.description,
        };

        snapshot
            .validate()
            .map_err(|e| AdvisorError::upstream(SERVICE, format!("implausible reading: {}", e)))?;

        Ok(snapshot)
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

pub struct HttpWeatherProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWeatherProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        HttpWeatherProvider {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn request_url(&self, location: &str) -> String {
        format!("{}/weather?location={}", self.base_url, urlencoding::encode(location))
    }

    async fn fetch(&self, location: &str) -> Result<WeatherSnapshot> {
        let url = self.request_url(location);
        tracing::debug!("Fetching weather for {}", location);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AdvisorError::upstream(SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AdvisorError::upstream(
                SERVICE,
                format!("Weather API error: {}", response.status()),
            ));
        }

        let body: WeatherApiResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::upstream(SERVICE, format!("Parse error: {}", e)))?;

        body.into_snapshot()
    }
}

impl WeatherProvider for HttpWeatherProvider {
    fn get_weather<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<WeatherSnapshot>> {
        Box::pin(self.fetch(location))
    }
}
