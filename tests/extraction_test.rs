// ABOUTME: Integration tests for the ingredient extraction boundary
// ABOUTME: Covers reply parsing, unit conversion, the scripted extractor and the HTTP extractor's failure paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, clippy::float_cmp)]

mod common;

use common::init_test_logging;
use meal_estimator::config::LlmExtractorConfig;
use meal_estimator::extraction::{
    parse_ingredient_content, ExtractedIngredient, ExtractionError, ExtractionRequest,
    ExtractorCapabilities, IngredientExtractor, LlmIngredientExtractor, ServiceIngredient,
    StaticIngredientExtractor,
};
use meal_estimator::MealType;
use std::time::Duration;

#[test]
fn test_parse_wrapped_object() {
    let reply = r#"{"ingredients": [
        {"name": "chicken breast", "quantity": 150, "unit": "g", "confidence": 0.9},
        {"name": "brown rice", "quantity": 1, "unit": "cup"}
    ]}"#;
    let items = parse_ingredient_content(reply).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].raw_name, "chicken breast");
    assert_eq!(items[0].estimated_quantity_g, Some(150.0));
    assert_eq!(items[0].confidence_hint, Some(0.9));
    assert_eq!(items[1].estimated_quantity_g, Some(240.0));
}

#[test]
fn test_parse_fenced_bare_array_with_prose() {
    let reply = "Here is what I found:\n```json\n[{\"ingredient\": \"eggs\", \"amount\": \"2\", \"unit\": \"pieces\"}]\n```\nEnjoy!";
    let items = parse_ingredient_content(reply).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].estimated_quantity_g, Some(100.0));
}

#[test]
fn test_parse_unknown_unit_keeps_ingredient_without_quantity() {
    let reply = r#"[{"name": "rice", "quantity": 3, "unit": "bushels"}]"#;
    let items = parse_ingredient_content(reply).unwrap();
    assert_eq!(items[0].raw_name, "rice");
    assert_eq!(items[0].estimated_quantity_g, None);
}

#[test]
fn test_parse_empty_list_is_empty() {
    assert_eq!(
        parse_ingredient_content(r#"{"ingredients": []}"#),
        Err(ExtractionError::Empty)
    );
    assert_eq!(parse_ingredient_content("[]"), Err(ExtractionError::Empty));
}

#[test]
fn test_parse_garbage_is_unavailable() {
    for reply in ["I cannot see any food.", "{\"ingredients\": 7}", ""] {
        assert!(
            matches!(
                parse_ingredient_content(reply),
                Err(ExtractionError::Unavailable { .. })
            ),
            "{reply:?}"
        );
    }
}

#[test]
fn test_service_ingredient_null_quantity() {
    let item: ServiceIngredient =
        serde_json::from_str(r#"{"food": "salad", "quantity": null}"#).unwrap();
    let extracted = item.into_extracted();
    assert_eq!(extracted.raw_name, "salad");
    assert_eq!(extracted.estimated_quantity_g, None);
}

#[test]
fn test_request_builders() {
    let request = ExtractionRequest::text("two eggs", MealType::Breakfast);
    assert!(!request.has_image());
    let request = request.with_image(vec![1, 2, 3]);
    assert!(request.has_image());
}

#[tokio::test]
async fn test_static_extractor_scripted_failures() {
    let extractor =
        StaticIngredientExtractor::with_ingredients(vec![ExtractedIngredient::new("egg", 50.0)])
            .with_initial_failures(2);
    let request = ExtractionRequest::text("an egg", MealType::Snack);

    assert!(extractor.extract(&request).await.is_err());
    assert!(extractor.extract(&request).await.is_err());
    let items = extractor.extract(&request).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(extractor.call_count(), 3);
}

#[tokio::test]
async fn test_static_extractor_empty_list_reports_empty() {
    let request = ExtractionRequest::text("air", MealType::Other);
    let extractor = StaticIngredientExtractor::with_ingredients(vec![]);
    assert_eq!(
        extractor.extract(&request).await,
        Err(ExtractionError::Empty)
    );
    assert_eq!(
        StaticIngredientExtractor::empty().extract(&request).await,
        Err(ExtractionError::Empty)
    );
}

#[test]
fn test_capabilities() {
    let extractor = StaticIngredientExtractor::empty()
        .with_capabilities(ExtractorCapabilities::JSON_MODE)
        .with_delay(Duration::from_millis(1));
    assert!(!extractor.capabilities().supports_vision());
    assert!(extractor.capabilities().supports_json_mode());

    let llm = LlmIngredientExtractor::new(LlmExtractorConfig {
        vision: false,
        ..LlmExtractorConfig::default()
    })
    .unwrap();
    assert!(!llm.capabilities().supports_vision());
    assert_eq!(llm.name(), "openai_compatible");
}

#[tokio::test]
async fn test_llm_photo_only_without_vision_is_unavailable() {
    init_test_logging();
    let llm = LlmIngredientExtractor::new(LlmExtractorConfig {
        vision: false,
        ..LlmExtractorConfig::default()
    })
    .unwrap();
    let request = ExtractionRequest::text("", MealType::Dinner).with_image(vec![0xFF, 0xD8]);
    let error = llm.extract(&request).await.unwrap_err();
    assert!(matches!(error, ExtractionError::Unavailable { reason } if reason.contains("vision")));
}

#[tokio::test]
async fn test_llm_unreachable_service_is_unavailable() {
    init_test_logging();
    let llm = LlmIngredientExtractor::new(LlmExtractorConfig {
        base_url: "http://127.0.0.1:9/v1".to_owned(),
        ..LlmExtractorConfig::default()
    })
    .unwrap();
    let request = ExtractionRequest::text("150g salmon", MealType::Dinner);
    assert!(matches!(
        llm.extract(&request).await,
        Err(ExtractionError::Unavailable { .. })
    ));
}
