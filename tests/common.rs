// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, the bundled reference, and scripted analyzers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used
)]
//! Shared test utilities for `meal_estimator`

use meal_estimator::config::AnalyzerConfig;
use meal_estimator::extraction::{ExtractedIngredient, StaticIngredientExtractor};
use meal_estimator::reference::FoodCompositionReference;
use meal_estimator::MealAnalyzer;
use std::env;
use std::io::Write;
use std::sync::{Arc, Once};
use tempfile::NamedTempFile;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Bundled reference snapshot behind an `Arc`
pub fn bundled_reference() -> Arc<FoodCompositionReference> {
    init_test_logging();
    Arc::new(FoodCompositionReference::bundled().expect("bundled reference must load"))
}

/// Analyzer over the bundled reference with a scripted extractor
pub fn analyzer_with(extractor: StaticIngredientExtractor) -> MealAnalyzer {
    analyzer_with_config(extractor, AnalyzerConfig::default())
}

/// Analyzer with explicit configuration
pub fn analyzer_with_config(
    extractor: StaticIngredientExtractor,
    config: AnalyzerConfig,
) -> MealAnalyzer {
    MealAnalyzer::new(bundled_reference(), Arc::new(extractor), config)
}

/// Analyzer whose extractor always returns `ingredients`
pub fn analyzer_returning(ingredients: Vec<ExtractedIngredient>) -> MealAnalyzer {
    analyzer_with(StaticIngredientExtractor::with_ingredients(ingredients))
}

/// Write `json` to a temporary file that lives as long as the handle
pub fn reference_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(json.as_bytes()).expect("write temp file");
    file
}

/// Minimal valid snapshot JSON with one food and one synonym
pub fn minimal_reference_json() -> String {
    r#"{
        "version": "test-1",
        "standard": "unit test table",
        "foods": {
            "broccoli": {
                "calories": 35, "protein_g": 2.4, "carbs_g": 7.2, "fat_g": 0.4,
                "sodium_mg": 41, "sugar_g": 1.4, "fiber_g": 3.3, "source": "reference"
            }
        },
        "synonyms": { "calabrese": "broccoli" }
    }"#
    .to_owned()
}
