// ABOUTME: Ingredient extractor backed by any OpenAI-compatible chat completions endpoint
// ABOUTME: Supports Ollama, vLLM, LocalAI and hosted APIs; photos are sent as base64 data URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Extractor
//!
//! Sends the meal description (and photo, for vision-capable models) with a
//! fixed system prompt and parses the JSON ingredient list out of the reply.
//!
//! ## Configuration
//!
//! See [`LlmExtractorConfig::from_env`]:
//! - `MEAL_LLM_BASE_URL`: Base URL (default: <http://localhost:11434/v1> for Ollama)
//! - `MEAL_LLM_MODEL`: Model to use
//! - `MEAL_LLM_API_KEY`: API key (optional, empty for local servers)
//! - `MEAL_LLM_VISION`: whether the model accepts images
//!
//! ## Example
//!
//! ```rust,no_run
//! use meal_estimator::extraction::{ExtractionRequest, IngredientExtractor, LlmIngredientExtractor};
//! use meal_estimator::MealType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = LlmIngredientExtractor::from_env()?;
//! let request = ExtractionRequest::text("two eggs and toast", MealType::Breakfast);
//! let ingredients = extractor.extract(&request).await?;
//! println!("{} ingredients", ingredients.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::prompts::{user_message, INGREDIENT_EXTRACTION_PROMPT};
use super::{
    ExtractedIngredient, ExtractionError, ExtractionRequest, ExtractorCapabilities,
    IngredientExtractor, ServiceIngredient,
};
use crate::config::LlmExtractorConfig;
use crate::errors::AppError;

/// Connection timeout; the analyzer bounds the whole call separately
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Hard ceiling for one HTTP exchange
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Extraction must be reproducible, so sampling is disabled
const EXTRACTION_TEMPERATURE: f32 = 0.0;

/// Upper bound on the ingredient list reply
const MAX_RESPONSE_TOKENS: u32 = 1024;

/// Characters of a non-JSON error body kept in the failure reason
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

/// Plain text, or text plus image parts for vision models
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Accepted reply shapes: `{"ingredients": [...]}` or a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientPayload {
    Wrapped { ingredients: Vec<ServiceIngredient> },
    Bare(Vec<ServiceIngredient>),
}

impl IngredientPayload {
    fn into_items(self) -> Vec<ServiceIngredient> {
        match self {
            Self::Wrapped { ingredients } | Self::Bare(ingredients) => ingredients,
        }
    }
}

// ============================================================================
// Extractor
// ============================================================================

/// Extractor for any `OpenAI`-compatible endpoint
pub struct LlmIngredientExtractor {
    client: Client,
    config: LlmExtractorConfig,
    capabilities: ExtractorCapabilities,
}

impl LlmIngredientExtractor {
    /// Create an extractor with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: LlmExtractorConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        let capabilities = if config.vision {
            ExtractorCapabilities::JSON_MODE | ExtractorCapabilities::VISION
        } else {
            ExtractorCapabilities::JSON_MODE
        };

        Ok(Self {
            client,
            config,
            capabilities,
        })
    }

    /// Create an extractor from `MEAL_LLM_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the HTTP client cannot be created.
    pub fn from_env() -> Result<Self, AppError> {
        let config = LlmExtractorConfig::from_env()?;
        info!(
            "Initializing ingredient extractor: base_url={}, model={}, vision={}",
            config.base_url, config.model, config.vision
        );
        Self::new(config)
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &LlmExtractorConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    fn build_messages(&self, request: &ExtractionRequest) -> Vec<ChatMessage> {
        let image = request
            .image
            .as_deref()
            .filter(|_| self.capabilities.supports_vision());
        let prompt = user_message(&request.text, request.meal_type.label(), image.is_some());

        let content = match image {
            Some(bytes) => MessageContent::Parts(vec![
                ContentPart::Text { text: prompt },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_data_url(bytes),
                    },
                },
            ]),
            None => MessageContent::Text(prompt),
        };

        vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(INGREDIENT_EXTRACTION_PROMPT.to_owned()),
            },
            ChatMessage {
                role: "user",
                content,
            },
        ]
    }

    fn send_error(&self, e: &reqwest::Error) -> ExtractionError {
        error!("Failed to send extraction request: {}", e);
        if e.is_timeout() {
            ExtractionError::unavailable("extraction request timed out")
        } else if e.is_connect() {
            ExtractionError::unavailable(format!(
                "cannot connect to extraction service at {}",
                self.config.base_url
            ))
        } else {
            ExtractionError::unavailable(format!("failed to reach extraction service: {e}"))
        }
    }
}

#[async_trait]
impl IngredientExtractor for LlmIngredientExtractor {
    fn name(&self) -> &'static str {
        "openai_compatible"
    }

    fn capabilities(&self) -> ExtractorCapabilities {
        self.capabilities
    }

    #[instrument(
        skip(self, request),
        fields(model = %self.config.model, text_len = request.text.len(), has_image = request.has_image())
    )]
    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Vec<ExtractedIngredient>, ExtractionError> {
        if request.has_image() && !self.capabilities.supports_vision() {
            if request.text.trim().is_empty() {
                return Err(ExtractionError::unavailable(
                    "photo-only input requires a vision-capable model",
                ));
            }
            warn!(
                model = %self.config.model,
                "Model has no vision support; sending meal text without the photo"
            );
        }

        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: self.build_messages(request),
            temperature: EXTRACTION_TEMPERATURE,
            max_tokens: MAX_RESPONSE_TOKENS,
            stream: false,
            response_format: self
                .capabilities
                .supports_json_mode()
                .then_some(ResponseFormat {
                    format_type: "json_object",
                }),
        };

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&body);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.send_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read extraction response: {}", e);
            ExtractionError::unavailable(format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(describe_error_response(status, &text));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse extraction response: {}", e);
            ExtractionError::unavailable(format!("malformed completion response: {e}"))
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ExtractionError::unavailable("completion returned no choices"))?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received extraction reply: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        parse_ingredient_content(&content)
    }
}

/// Parse the model's reply into extracted ingredients
///
/// Tolerates markdown code fences and surrounding prose, and accepts both
/// `{"ingredients": [...]}` and a bare JSON array.
///
/// # Errors
///
/// Returns [`ExtractionError::Unavailable`] when no JSON list can be parsed
/// and [`ExtractionError::Empty`] when the list has no items.
pub fn parse_ingredient_content(
    content: &str,
) -> Result<Vec<ExtractedIngredient>, ExtractionError> {
    let json = json_block(content)
        .ok_or_else(|| ExtractionError::unavailable("reply contained no JSON"))?;
    let payload: IngredientPayload = serde_json::from_str(json)
        .map_err(|e| ExtractionError::unavailable(format!("malformed ingredient list: {e}")))?;

    let items = payload.into_items();
    if items.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(items
        .into_iter()
        .map(ServiceIngredient::into_extracted)
        .collect())
}

/// Slice from the first opening bracket to the last closing one
fn json_block(content: &str) -> Option<&str> {
    let start = content.find(['{', '['])?;
    let end = content.rfind(['}', ']'])?;
    content.get(start..=end)
}

fn image_data_url(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        image_mime_type(bytes),
        BASE64_STANDARD.encode(bytes)
    )
}

/// Sniff the image format from its magic bytes (JPEG when unknown)
fn image_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP".as_slice()) {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

/// Map a non-2xx reply to an unavailable error with a useful reason
fn describe_error_response(status: StatusCode, body: &str) -> ExtractionError {
    if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(body) {
        let message = error_response.error.message;
        let reason = match status.as_u16() {
            401 | 403 => format!("authentication failed: {message}"),
            404 => format!("model or endpoint not found: {message}"),
            429 => format!("rate limited: {message}"),
            503 => format!("service unavailable: {message}"),
            _ => format!(
                "{} - {message}",
                error_response
                    .error
                    .error_type
                    .as_deref()
                    .unwrap_or("unknown")
            ),
        };
        return ExtractionError::unavailable(reason);
    }

    match status.as_u16() {
        502..=504 => ExtractionError::unavailable("extraction server is not responding"),
        _ => ExtractionError::unavailable(format!(
            "API error ({status}): {}",
            body.chars()
                .take(ERROR_BODY_PREVIEW_CHARS)
                .collect::<String>()
        )),
    }
}
