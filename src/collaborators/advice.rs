//! Advice text generation
//!
//! Builds the prompts for a chat-completion LLM and returns its prose. The
//! text is display-only and never feeds back into the engine. Callers go
//! through `advice_or_placeholder`, which turns every failure (rate limit,
//! exhausted credits, missing key, transport) into a fixed placeholder.

use serde::{Deserialize, Serialize};

use super::BoxFuture;
use crate::engine::{FertilizerTier, WeatherSnapshot};
use crate::error::{AdvisorError, Result};

const SERVICE: &str = "advice";

/// Returned to the caller whenever advice cannot be generated
pub const ADVICE_PLACEHOLDER: &str = "Unable to generate advice at this time.";

/// Response language requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "bn")]
    Bengali,
}

/// Everything the advice prompt mentions
#[derive(Debug, Clone, Serialize)]
pub struct AdviceContext {
    pub crop_type: String,
    pub variety: String,
    pub soil_ph: f64,
    pub location: String,
    pub weather: WeatherSnapshot,
    pub fertilizer_tier: FertilizerTier,
    pub irrigation_needed: bool,
    pub language: Language,
}

pub trait AdviceGenerator: Send + Sync {
    fn generate_advice<'a>(&'a self, context: &'a AdviceContext) -> BoxFuture<'a, Result<String>>;
}

/// Advice text, or the placeholder if the generator fails
pub async fn advice_or_placeholder(generator: &dyn AdviceGenerator, context: &AdviceContext) -> String {
    match generator.generate_advice(context).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            tracing::warn!("Advice generator returned empty text; using placeholder");
            ADVICE_PLACEHOLDER.to_string()
        }
        Err(e) => {
            tracing::warn!("Advice generation failed: {}", e);
            ADVICE_PLACEHOLDER.to_string()
        }
    }
}

// ============================================================================
// Prompts
// ============================================================================

pub fn system_prompt(language: Language) -> String {
    let language_instruction = match language {
        Language::Bengali => "Respond in Bengali (বাংলা) language only.",
        Language::English => "Respond in English only.",
    };

    format!(
        "You are an expert agricultural advisor for farmers in Bangladesh. {} \
         Give practical, actionable farming advice in 3-4 sentences. \
         Be professional and encouraging. Focus on immediate actions the farmer should take. \
         IMPORTANT: Do NOT use any religious greetings or phrases like Namaste, Assalamualaikum, \
         Bismillah, or any other religious words. Keep the advice purely agricultural and secular.",
        language_instruction
    )
}

pub fn user_prompt(context: &AdviceContext) -> String {
    let w = &context.weather;
    format!(
        "Crop: {} (variety: {})\n\
         Location: {}, Bangladesh\n\
         Soil pH: {:.1}\n\
         Weather: {}, Temperature: {}°C, Humidity: {}%, Rainfall: {}mm\n\
         Soil Moisture: {}%\n\
         Fertilizer Level Needed: {}\n\
         Irrigation Needed: {}\n\n\
         Provide 3-4 lines of personalized farming advice for this specific situation.",
        context.crop_type,
        context.variety,
        context.location,
        context.soil_ph,
        w.condition.as_deref().unwrap_or("unknown"),
        w.temperature_c,
        w.humidity_pct,
        w.rainfall_mm,
        w.soil_moisture_pct,
        context.fertilizer_tier,
        if context.irrigation_needed { "Yes" } else { "No" },
    )
}

// ============================================================================
// Chat Completion Client
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completion client
pub struct ChatCompletionAdvisor {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatCompletionAdvisor {
    pub fn new(client: reqwest::Client, url: &str, api_key: Option<String>, model: &str) -> Self {
        ChatCompletionAdvisor {
            client,
            url: url.to_string(),
            api_key,
            model: model.to_string(),
        }
    }

    async fn complete(&self, context: &AdviceContext) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AdvisorError::upstream(SERVICE, "advice API key is not configured"))?;

        let system = system_prompt(context.language);
        let user = user_prompt(context);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: &system },
                ChatMessage { role: "user", content: &user },
            ],
        };

        tracing::info!(
            "Generating advice for {} ({}) in {}",
            context.crop_type, context.variety, context.location
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdvisorError::upstream(SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status.as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::upstream(SERVICE, format!("Parse error: {}", e)))?;

        extract_content(body)
    }
}

impl AdviceGenerator for ChatCompletionAdvisor {
    fn generate_advice<'a>(&'a self, context: &'a AdviceContext) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.complete(context))
    }
}

fn classify_status(status: u16) -> AdvisorError {
    match status {
        429 => AdvisorError::upstream(SERVICE, "Rate limit exceeded. Please try again later."),
        402 => AdvisorError::upstream(SERVICE, "AI credits exhausted. Please add credits."),
        other => AdvisorError::upstream(SERVICE, format!("AI gateway error: {}", other)),
    }
}

fn extract_content(body: ChatResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AdvisorError::upstream(SERVICE, "empty completion"))
}
