// ABOUTME: Ingredient extraction boundary between the analyzer and an external recognition service
// ABOUTME: Defines the extractor trait, request/response types and the adapter error kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient Extraction
//!
//! The external service turns meal text (and optionally a photo) into a list
//! of candidate ingredients with quantities. This module only translates:
//! it never computes nutrients, and its output is treated as untrusted by
//! the aggregation engine.
//!
//! ## Implementations
//!
//! - [`LlmIngredientExtractor`]: any OpenAI-compatible chat completions endpoint
//! - [`StaticIngredientExtractor`]: fixed output, for tests and offline callers
//!
//! Implementations must be idempotent: calling `extract` twice with the same
//! request is safe, which allows the analyzer to retry.

mod llm;
mod prompts;
mod static_extractor;
/// Unit conversion from service quantities to grams
pub mod units;

pub use llm::{parse_ingredient_content, LlmIngredientExtractor};
pub use static_extractor::StaticIngredientExtractor;

use async_trait::async_trait;
use meal_estimator_core::models::MealType;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Adapter failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Service unreachable, timed out, or returned malformed output
    #[error("Extraction service unavailable: {reason}")]
    Unavailable {
        /// Human-readable failure description
        reason: String,
    },

    /// Service responded but identified zero ingredients
    #[error("Extraction service identified no ingredients")]
    Empty,
}

impl ExtractionError {
    /// Unavailable with the given reason
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

bitflags::bitflags! {
    /// Extractor capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExtractorCapabilities: u8 {
        /// Accepts image input alongside text
        const VISION = 0b0000_0001;
        /// Can be asked for a JSON object response
        const JSON_MODE = 0b0000_0010;
    }
}

impl ExtractorCapabilities {
    /// Whether image input is supported
    #[must_use]
    pub const fn supports_vision(self) -> bool {
        self.contains(Self::VISION)
    }

    /// Whether JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(self) -> bool {
        self.contains(Self::JSON_MODE)
    }
}

/// Input for one extraction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Meal description as typed by the user (may be empty for photo-only input)
    pub text: String,
    /// Raw image bytes, if a photo was supplied
    pub image: Option<Vec<u8>>,
    /// Meal occasion, passed along as context for the service
    pub meal_type: MealType,
}

impl ExtractionRequest {
    /// Text-only request
    pub fn text(text: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            text: text.into(),
            image: None,
            meal_type,
        }
    }

    /// Attach a photo
    #[must_use]
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    /// Whether the request carries a photo
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// One candidate ingredient produced by an extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIngredient {
    /// Name as produced by the service, not yet normalized
    pub raw_name: String,
    /// Estimated mass in grams (absent or zero when unspecified)
    pub estimated_quantity_g: Option<f64>,
    /// Advisory per-item certainty; never used for the final numbers
    pub confidence_hint: Option<f64>,
}

impl ExtractedIngredient {
    /// Ingredient with a gram estimate
    pub fn new(raw_name: impl Into<String>, quantity_g: f64) -> Self {
        Self {
            raw_name: raw_name.into(),
            estimated_quantity_g: Some(quantity_g),
            confidence_hint: None,
        }
    }

    /// Ingredient with no quantity
    pub fn unquantified(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            estimated_quantity_g: None,
            confidence_hint: None,
        }
    }

    /// Attach an advisory confidence hint
    #[must_use]
    pub const fn with_confidence_hint(mut self, hint: f64) -> Self {
        self.confidence_hint = Some(hint);
        self
    }
}

/// Item as returned on the wire by the recognition service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceIngredient {
    /// Ingredient name
    #[serde(alias = "ingredient", alias = "food")]
    pub name: String,
    /// Amount in `unit`
    #[serde(
        default,
        alias = "amount",
        alias = "estimated_quantity",
        deserialize_with = "lenient_number"
    )]
    pub quantity: Option<f64>,
    /// Unit of `quantity` (g, oz, cup, piece, ...)
    #[serde(default)]
    pub unit: Option<String>,
    /// Service-reported certainty
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
}

impl ServiceIngredient {
    /// Convert to grams, dropping quantities whose unit cannot be interpreted
    #[must_use]
    pub fn into_extracted(self) -> ExtractedIngredient {
        let estimated_quantity_g = self
            .quantity
            .and_then(|amount| units::quantity_to_grams(&self.name, amount, self.unit.as_deref()));
        ExtractedIngredient {
            raw_name: self.name,
            estimated_quantity_g,
            confidence_hint: self.confidence,
        }
    }
}

/// Accept numbers, numeric strings and null
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    Ok(
        match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(NumberOrText::Number(value)) => Some(value),
            Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().ok(),
            None => None,
        },
    )
}

/// Ingredient recognition service
#[async_trait]
pub trait IngredientExtractor: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// What this extractor supports
    fn capabilities(&self) -> ExtractorCapabilities;

    /// Extract candidate ingredients from a meal description and/or photo
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Unavailable`] when the service cannot be
    /// reached or its output is malformed, and [`ExtractionError::Empty`]
    /// when it identifies nothing.
    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Vec<ExtractedIngredient>, ExtractionError>;
}
