// ABOUTME: End-to-end tests for MealAnalyzer::analyze over scripted extractors
// ABOUTME: Walks the documented meal scenarios plus timeout, retry and input validation paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, clippy::float_cmp)]

mod common;

use common::{analyzer_returning, analyzer_with, analyzer_with_config};
use meal_estimator::aggregation::ResolutionMode;
use meal_estimator::config::AnalyzerConfig;
use meal_estimator::extraction::{ExtractedIngredient, StaticIngredientExtractor};
use meal_estimator::{AnalysisError, ConfidenceLevel, MealType};
use std::sync::Arc;
use std::time::Duration;

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

#[tokio::test]
async fn test_measured_meal_is_high_confidence() {
    let analyzer = analyzer_returning(vec![
        ExtractedIngredient::new("grilled chicken breast", 150.0),
        ExtractedIngredient::new("brown rice", 200.0),
        ExtractedIngredient::new("broccoli", 100.0),
    ]);

    let result = analyzer
        .analyze(
            "150g grilled chicken breast, 200g brown rice, 100g broccoli",
            None,
            "lunch",
        )
        .await
        .unwrap();

    assert_eq!(result.seed_confidence, ConfidenceLevel::High);
    assert!(result
        .resolution_sources
        .iter()
        .all(|source| source.mode == ResolutionMode::ExactMatch));
    assert_eq!(result.coverage_percentage, 100.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::High);
    assert_eq!(result.accuracy_range, "±15%");
    assert_eq!(result.meal_type, MealType::Lunch);
    assert_eq!(result.meal_name, "150g grilled chicken breast");
    assert!((result.total_nutrients.calories - 528.5).abs() < 1e-9);
    assert_eq!(result.recomputed_coverage(), result.coverage_percentage);
}

#[tokio::test]
async fn test_portion_descriptor_meal_is_capped_at_medium() {
    let analyzer = analyzer_returning(vec![
        ExtractedIngredient::new("rice", 250.0),
        ExtractedIngredient::new("chicken", 100.0),
    ]);

    let result = analyzer
        .analyze("a bowl of rice with some chicken", None, "dinner")
        .await
        .unwrap();

    assert_eq!(result.seed_confidence, ConfidenceLevel::Medium);
    assert!((40.0..=100.0).contains(&result.coverage_percentage));
    assert_eq!(
        result.confidence_level,
        ConfidenceLevel::min_of(ConfidenceLevel::Medium, result.coverage_confidence)
    );
    assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
    assert_eq!(result.accuracy_range, "±20\u{2013}25%");
}

#[tokio::test]
async fn test_counted_containers_seed_medium_not_high() {
    let analyzer = analyzer_returning(vec![ExtractedIngredient::new("lentils", 400.0)]);

    let result = analyzer
        .analyze("2 bowls of lentil soup", None, "dinner")
        .await
        .unwrap();

    assert_eq!(result.seed_confidence, ConfidenceLevel::Medium);
    assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
}

#[tokio::test]
async fn test_vague_meal_seeds_medium_low() {
    let analyzer = analyzer_returning(vec![
        ExtractedIngredient::new("chicken", 150.0),
        ExtractedIngredient::new("rice", 150.0),
    ]);

    let result = analyzer
        .analyze("some chicken and rice", None, "dinner")
        .await
        .unwrap();

    assert_eq!(result.seed_confidence, ConfidenceLevel::MediumLow);
    assert!(result.confidence_level <= ConfidenceLevel::MediumLow);
}

#[tokio::test]
async fn test_photo_only_is_low_regardless_of_extraction() {
    let analyzer = analyzer_returning(vec![
        ExtractedIngredient::new("salmon", 180.0),
        ExtractedIngredient::new("asparagus", 90.0),
    ]);

    let result = analyzer
        .analyze("", Some(JPEG_BYTES), "dinner")
        .await
        .unwrap();

    assert_eq!(result.seed_confidence, ConfidenceLevel::Low);
    assert_eq!(result.coverage_percentage, 100.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::Low);
    assert_eq!(result.meal_name, "Dinner (photo)");
    assert!(result
        .disclaimer
        .tips
        .iter()
        .any(|tip| tip.contains("description to the photo")));
}

#[tokio::test]
async fn test_extraction_timeout_returns_unavailable() {
    let extractor = StaticIngredientExtractor::with_ingredients(vec![ExtractedIngredient::new(
        "egg", 50.0,
    )])
    .with_delay(Duration::from_millis(200));
    let config = AnalyzerConfig::default().with_extraction_timeout(Duration::from_millis(50));
    let analyzer = analyzer_with_config(extractor, config);

    let error = analyzer
        .analyze("2 eggs", None, "breakfast")
        .await
        .unwrap_err();

    match error {
        AnalysisError::ExtractionUnavailable { reason } => assert!(reason.contains("timed out")),
        other => panic!("expected ExtractionUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zero_quantities_force_low_confidence() {
    let analyzer = analyzer_returning(vec![
        ExtractedIngredient::new("chicken breast", 0.0),
        ExtractedIngredient::new("brown rice", 0.0),
    ]);

    let result = analyzer
        .analyze("150g chicken breast and 100g brown rice", None, "lunch")
        .await
        .unwrap();

    assert_eq!(result.seed_confidence, ConfidenceLevel::High);
    assert_eq!(result.coverage_percentage, 0.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::Low);
    assert_eq!(result.total_mass_g, 0.0);
}

#[tokio::test]
async fn test_unavailable_is_retried_then_succeeds() {
    let extractor = StaticIngredientExtractor::with_ingredients(vec![ExtractedIngredient::new(
        "banana", 120.0,
    )])
    .with_initial_failures(2);
    let config = AnalyzerConfig::default().with_max_extraction_retries(2);
    let analyzer = analyzer_with_config(extractor, config);

    let result = analyzer.analyze("1 banana", None, "snack").await.unwrap();
    assert_eq!(result.ingredients.len(), 1);
}

#[tokio::test]
async fn test_retries_exhausted_returns_unavailable() {
    let extractor = StaticIngredientExtractor::with_ingredients(vec![ExtractedIngredient::new(
        "banana", 120.0,
    )])
    .with_initial_failures(3);
    let config = AnalyzerConfig::default().with_max_extraction_retries(1);
    let analyzer = analyzer_with_config(extractor, config);

    let error = analyzer.analyze("1 banana", None, "snack").await.unwrap_err();
    assert!(matches!(error, AnalysisError::ExtractionUnavailable { .. }));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_empty_extraction_is_not_retried() {
    let analyzer = analyzer_with_config(
        StaticIngredientExtractor::empty(),
        AnalyzerConfig::default().with_max_extraction_retries(3),
    );
    let error = analyzer
        .analyze("something tasty", None, "snack")
        .await
        .unwrap_err();
    assert!(matches!(error, AnalysisError::ExtractionEmpty));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_blank_names_only_is_empty() {
    let analyzer = analyzer_returning(vec![
        ExtractedIngredient::new("  ", 100.0),
        ExtractedIngredient::new("", 50.0),
    ]);
    let error = analyzer.analyze("soup", None, "lunch").await.unwrap_err();
    assert!(matches!(error, AnalysisError::ExtractionEmpty));
}

#[tokio::test]
async fn test_empty_input_is_rejected_before_extraction() {
    let analyzer = analyzer_with(StaticIngredientExtractor::unavailable("must not be called"));

    for (text, image) in [("", None), ("   ", None), ("", Some(&[][..]))] {
        let error = analyzer.analyze(text, image, "lunch").await.unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidInput { .. }), "{text:?}");
    }
}

#[tokio::test]
async fn test_oversized_input_is_rejected() {
    let config = AnalyzerConfig {
        max_description_chars: 10,
        max_image_bytes: 4,
        ..AnalyzerConfig::default()
    };
    let analyzer = analyzer_with_config(StaticIngredientExtractor::empty(), config);

    let error = analyzer
        .analyze("a very long description", None, "lunch")
        .await
        .unwrap_err();
    assert!(matches!(error, AnalysisError::InvalidInput { .. }));

    let error = analyzer
        .analyze("", Some(JPEG_BYTES), "lunch")
        .await
        .unwrap_err();
    assert!(matches!(error, AnalysisError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_unmatched_ingredients_degrade_confidence() {
    let analyzer = analyzer_returning(vec![
        ExtractedIngredient::new("chicken breast", 100.0),
        ExtractedIngredient::new("jollof sauce", 300.0),
    ]);

    let result = analyzer
        .analyze("100g chicken breast with 300g jollof sauce", None, "dinner")
        .await
        .unwrap();

    assert_eq!(result.coverage_percentage, 25.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::Low);
    assert!(result.resolution_sources[1].name.starts_with("estimated:"));
    assert!(result
        .disclaimer
        .tips
        .iter()
        .any(|tip| tip.contains("jollof sauce")));
}

#[tokio::test]
async fn test_unknown_meal_type_and_serialization() {
    let analyzer = analyzer_returning(vec![ExtractedIngredient::new("apple", 180.0)]);
    let result = analyzer.analyze("1 apple", None, "brunch").await.unwrap();
    assert_eq!(result.meal_type, MealType::Other);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["resolution_sources"][0]["mode"], "EXACT_MATCH");
    assert!(json["request_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_concurrent_requests_share_one_analyzer() {
    let analyzer = Arc::new(analyzer_returning(vec![ExtractedIngredient::new(
        "oatmeal", 250.0,
    )]));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let analyzer = analyzer.clone();
            tokio::spawn(async move { analyzer.analyze("250g oatmeal", None, "breakfast").await })
        })
        .collect();

    let mut calories = Vec::new();
    for handle in handles {
        calories.push(handle.await.unwrap().unwrap().total_nutrients.calories.to_bits());
    }
    assert!(calories.windows(2).all(|pair| pair[0] == pair[1]));
}
