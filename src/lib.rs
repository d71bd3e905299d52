// ABOUTME: Main library entry point for the meal nutrition estimator
// ABOUTME: Blends ingredient extraction with a fixed food composition reference and reports confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Meal Estimator
//!
//! Estimates the nutritional content of a free-text or photo-derived meal
//! description. An external language-understanding service proposes
//! ingredients and portions; each one is resolved against a curated food
//! composition reference (or a category fallback when it is missing), and
//! the result reports how much of the estimate is backed by the reference.
//!
//! ## Pipeline
//!
//! - **Classifier**: confidence seed from the input text alone
//! - **Extraction**: pluggable ingredient recognition service
//! - **Aggregation**: reference lookup, nutrient totals, mass coverage
//! - **Disclaimer**: accuracy band and improvement tips for the final tier
//!
//! The final confidence is `min(seed, coverage tier)`: coverage can only
//! lower what the input supports, never raise it.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use meal_estimator::config::AnalyzerConfig;
//! use meal_estimator::extraction::LlmIngredientExtractor;
//! use meal_estimator::reference::FoodCompositionReference;
//! use meal_estimator::MealAnalyzer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     meal_estimator::logging::init_from_env()?;
//!
//!     let reference = Arc::new(FoodCompositionReference::bundled()?);
//!     let extractor = Arc::new(LlmIngredientExtractor::from_env()?);
//!     let analyzer = MealAnalyzer::new(reference, extractor, AnalyzerConfig::from_env()?);
//!
//!     let result = analyzer
//!         .analyze("150g grilled chicken breast, 200g brown rice", None, "lunch")
//!         .await?;
//!     println!(
//!         "{}: {:.0} kcal ({}, {})",
//!         result.meal_name,
//!         result.total_nutrients.calories,
//!         result.confidence_level,
//!         result.accuracy_range
//!     );
//!     Ok(())
//! }
//! ```

/// Coverage and aggregation engine
pub mod aggregation;
/// Analysis orchestrator and result type
pub mod analyzer;
/// Input detail classifier
pub mod classifier;
/// Environment-based configuration
pub mod config;
/// Application constants and thresholds
pub mod constants;
/// Accuracy bands and improvement tips
pub mod disclaimer;
/// Analysis error kinds and conversions to the unified error type
pub mod errors;
/// Ingredient extraction boundary and implementations
pub mod extraction;
/// Production logging and structured output
pub mod logging;
/// Food composition reference table
pub mod reference;

pub use analyzer::{AnalysisResult, MealAnalyzer};
pub use errors::AnalysisError;
pub use meal_estimator_core::models::{ConfidenceLevel, MealType, NutrientProfile};
