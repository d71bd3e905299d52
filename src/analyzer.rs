// ABOUTME: MealAnalyzer orchestrating classification, extraction, aggregation and disclaimer formatting
// ABOUTME: Exposes analyze(), the single entry point used by the surrounding application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Analyzer
//!
//! Data flow for one request:
//!
//! ```text
//! input ─▶ classifier (seed) ─▶ extractor (timeout, retry) ─▶ aggregation ─▶ disclaimer
//! ```
//!
//! The analyzer holds only immutable state (reference snapshot, extractor
//! handle, configuration), so one instance can serve concurrent requests.
//! A request that is dropped mid-extraction simply abandons the call; no
//! partial result is ever produced.

use meal_estimator_core::models::{ConfidenceLevel, MealType, NutrientProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{field, instrument, warn, Span};
use uuid::Uuid;

use crate::aggregation::{
    combine_confidence, recompute_coverage, AggregationEngine, QuantitySource,
    ResolutionSource, ResolvedIngredient,
};
use crate::classifier::InputDetailClassifier;
use crate::config::AnalyzerConfig;
use crate::constants::limits::MAX_MEAL_NAME_CHARS;
use crate::disclaimer::{AccuracyBand, Disclaimer, DisclaimerContext, DisclaimerFormatter};
use crate::errors::{AnalysisError, AppError};
use crate::extraction::{
    ExtractedIngredient, ExtractionError, ExtractionRequest, IngredientExtractor,
};
use crate::logging::AnalysisLogger;
use crate::reference::FoodCompositionReference;

/// Final result of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Correlation id, also attached to the request's log span
    pub request_id: String,
    /// Short display name derived from the description
    pub meal_name: String,
    /// Meal occasion
    pub meal_type: MealType,
    /// Sum of all ingredient contributions
    pub total_nutrients: NutrientProfile,
    /// Share of total mass resolved through the reference, 0..=100
    pub coverage_percentage: f64,
    /// One record per ingredient, in extraction order
    pub resolution_sources: Vec<ResolutionSource>,
    /// Final tier: min(seed, coverage tier)
    pub confidence_level: ConfidenceLevel,
    /// Tier assigned from the input text alone
    pub seed_confidence: ConfidenceLevel,
    /// Tier supported by coverage alone
    pub coverage_confidence: ConfidenceLevel,
    /// Accuracy band rendered for display, e.g. `±15%`
    pub accuracy_range: String,
    /// Accuracy band bounds
    pub accuracy_band: AccuracyBand,
    /// Headline and improvement tips
    pub disclaimer: Disclaimer,
    /// Per-ingredient resolution records
    pub ingredients: Vec<ResolvedIngredient>,
    /// Version of the reference snapshot used
    pub reference_version: String,
    /// Total estimated mass in grams
    pub total_mass_g: f64,
}

impl AnalysisResult {
    /// Coverage re-derived from `resolution_sources`; equals `coverage_percentage`
    #[must_use]
    pub fn recomputed_coverage(&self) -> f64 {
        recompute_coverage(&self.resolution_sources)
    }
}

/// Stateless orchestrator over shared, read-only collaborators
pub struct MealAnalyzer {
    engine: AggregationEngine,
    extractor: Arc<dyn IngredientExtractor>,
    classifier: InputDetailClassifier,
    formatter: DisclaimerFormatter,
    config: AnalyzerConfig,
}

impl MealAnalyzer {
    /// Analyzer over an already-loaded reference
    #[must_use]
    pub fn new(
        reference: Arc<FoodCompositionReference>,
        extractor: Arc<dyn IngredientExtractor>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            engine: AggregationEngine::new(reference),
            extractor,
            classifier: InputDetailClassifier::new(),
            formatter: DisclaimerFormatter::new(),
            config,
        }
    }

    /// Analyzer configured from `MEAL_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the reference fails to load.
    pub fn from_env(extractor: Arc<dyn IngredientExtractor>) -> Result<Self, AppError> {
        let config = AnalyzerConfig::from_env()?;
        let reference = config.load_reference()?;
        Ok(Self::new(Arc::new(reference), extractor, config))
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Reference snapshot in use
    #[must_use]
    pub fn reference(&self) -> &FoodCompositionReference {
        self.engine.reference()
    }

    /// Estimate the nutrition of one meal
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidInput`]: no text and no image, or limits exceeded
    /// - [`AnalysisError::ExtractionUnavailable`]: service failed or timed out
    /// - [`AnalysisError::ExtractionEmpty`]: no ingredients identified
    #[instrument(
        skip(self, meal_description, image_bytes),
        fields(
            request_id = field::Empty,
            meal_type = %meal_type,
            text_len = meal_description.len(),
            image_len = image_bytes.map_or(0, <[u8]>::len),
        )
    )]
    pub async fn analyze(
        &self,
        meal_description: &str,
        image_bytes: Option<&[u8]>,
        meal_type: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let text = meal_description.trim();
        let image = image_bytes.filter(|bytes| !bytes.is_empty());
        self.validate_input(text, image)?;

        let meal_type = MealType::from_str_lossy(meal_type);
        let assessment = self.classifier.classify(text, image.is_some());

        let mut request = ExtractionRequest::text(text, meal_type);
        if let Some(bytes) = image {
            request = request.with_image(bytes.to_vec());
        }

        let extracted = self.extract_with_retry(&request, &request_id).await?;
        let extracted = drop_blank_names(extracted);
        if extracted.is_empty() {
            return Err(AnalysisError::ExtractionEmpty);
        }

        let aggregation = self.engine.aggregate(&extracted);
        let coverage_confidence = aggregation.coverage_confidence();
        let confidence_level = combine_confidence(
            assessment.seed,
            aggregation.coverage_percentage,
            aggregation.is_zero_mass(),
        );

        let context = DisclaimerContext {
            unmatched_ingredients: aggregation
                .estimated()
                .map(|ingredient| ingredient.raw_name.clone())
                .collect(),
            photo_only: text.is_empty() && image.is_some(),
            zero_mass: aggregation.is_zero_mass(),
            defaulted_quantities: aggregation
                .ingredients
                .iter()
                .filter(|ingredient| ingredient.quantity_source == QuantitySource::Defaulted)
                .count(),
        };
        let accuracy_band = self.formatter.accuracy_band(confidence_level);
        let disclaimer = self.formatter.format(confidence_level, &context);

        AnalysisLogger::log_analysis_completed(
            &request_id,
            assessment.seed,
            confidence_level,
            aggregation.coverage_percentage,
            aggregation.ingredients.len(),
            context.unmatched_ingredients.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok(AnalysisResult {
            request_id,
            meal_name: derive_meal_name(text, meal_type),
            meal_type,
            total_nutrients: aggregation.total_nutrients,
            coverage_percentage: aggregation.coverage_percentage,
            resolution_sources: aggregation.resolution_sources,
            confidence_level,
            seed_confidence: assessment.seed,
            coverage_confidence,
            accuracy_range: accuracy_band.to_string(),
            accuracy_band,
            disclaimer,
            ingredients: aggregation.ingredients,
            reference_version: self.reference().version().to_owned(),
            total_mass_g: aggregation.total_mass_g,
        })
    }

    fn validate_input(&self, text: &str, image: Option<&[u8]>) -> Result<(), AnalysisError> {
        if text.is_empty() && image.is_none() {
            return Err(AnalysisError::invalid_input(
                "meal description is empty and no image was supplied",
            ));
        }
        let chars = text.chars().count();
        if chars > self.config.max_description_chars {
            return Err(AnalysisError::invalid_input(format!(
                "meal description has {chars} characters, limit is {}",
                self.config.max_description_chars
            )));
        }
        if let Some(bytes) = image {
            if bytes.len() > self.config.max_image_bytes {
                return Err(AnalysisError::invalid_input(format!(
                    "image is {} bytes, limit is {}",
                    bytes.len(),
                    self.config.max_image_bytes
                )));
            }
        }
        Ok(())
    }

    /// Call the extractor under the configured timeout, retrying unavailable results
    async fn extract_with_retry(
        &self,
        request: &ExtractionRequest,
        request_id: &str,
    ) -> Result<Vec<ExtractedIngredient>, AnalysisError> {
        let attempts = self.config.max_extraction_retries + 1;
        let mut last_reason = String::new();

        for attempt in 1..=attempts {
            let reason =
                match timeout(self.config.extraction_timeout, self.extractor.extract(request))
                    .await
                {
                    Ok(Ok(items)) => return Ok(items),
                    Ok(Err(ExtractionError::Empty)) => return Err(AnalysisError::ExtractionEmpty),
                    Ok(Err(ExtractionError::Unavailable { reason })) => reason,
                    Err(_) => format!(
                        "extraction timed out after {}ms",
                        self.config.extraction_timeout.as_millis()
                    ),
                };
            AnalysisLogger::log_extraction_failure(
                request_id,
                self.extractor.name(),
                attempt,
                &reason,
            );
            last_reason = reason;
        }

        Err(AnalysisError::ExtractionUnavailable {
            reason: last_reason,
        })
    }
}

/// Remove items whose name is blank; the service output is untrusted
fn drop_blank_names(items: Vec<ExtractedIngredient>) -> Vec<ExtractedIngredient> {
    let before = items.len();
    let kept: Vec<ExtractedIngredient> = items
        .into_iter()
        .filter(|item| !item.raw_name.trim().is_empty())
        .collect();
    if kept.len() < before {
        warn!(
            dropped = before - kept.len(),
            "Dropped extracted ingredients with blank names"
        );
    }
    kept
}

/// First clause of the description, capitalized and capped; photo-only meals get a generic name
#[must_use]
pub fn derive_meal_name(description: &str, meal_type: MealType) -> String {
    let clause = description
        .split([',', ';', '\n'])
        .map(str::trim)
        .find(|clause| !clause.is_empty());

    let Some(clause) = clause else {
        return format!("{} (photo)", meal_type.label());
    };

    let mut chars = clause.chars();
    let mut name: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    if name.chars().count() > MAX_MEAL_NAME_CHARS {
        name = name.chars().take(MAX_MEAL_NAME_CHARS).collect::<String>();
        name = name.trim_end().to_owned();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_name_uses_first_clause() {
        assert_eq!(
            derive_meal_name("150g grilled chicken breast, 200g rice", MealType::Lunch),
            "150g grilled chicken breast"
        );
        assert_eq!(
            derive_meal_name("oatmeal; coffee", MealType::Breakfast),
            "Oatmeal"
        );
    }

    #[test]
    fn test_meal_name_for_photo_only() {
        assert_eq!(derive_meal_name("", MealType::Dinner), "Dinner (photo)");
        assert_eq!(derive_meal_name(" , ", MealType::Other), "Meal (photo)");
    }

    #[test]
    fn test_meal_name_is_capped() {
        let long = "a".repeat(200);
        assert_eq!(derive_meal_name(&long, MealType::Snack).chars().count(), 60);
    }

    #[test]
    fn test_blank_names_are_dropped() {
        let kept = drop_blank_names(vec![
            ExtractedIngredient::new("  ", 10.0),
            ExtractedIngredient::new("rice", 10.0),
        ]);
        assert_eq!(kept.len(), 1);
    }
}
