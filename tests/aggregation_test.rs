// ABOUTME: Integration tests for the coverage and aggregation engine
// ABOUTME: Checks determinism, coverage bounds, non-negativity, fallbacks and confidence combination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, clippy::float_cmp)]

mod common;

use common::bundled_reference;
use meal_estimator::aggregation::{
    combine_confidence, recompute_coverage, AggregationEngine, FoodCategory, QuantitySource,
    ResolutionMode, ESTIMATED_SOURCE_PREFIX,
};
use meal_estimator::extraction::ExtractedIngredient;
use meal_estimator::reference::FuzzyRule;
use meal_estimator::ConfidenceLevel;

fn engine() -> AggregationEngine {
    AggregationEngine::new(bundled_reference())
}

fn scenario_one() -> Vec<ExtractedIngredient> {
    vec![
        ExtractedIngredient::new("grilled chicken breast", 150.0),
        ExtractedIngredient::new("brown rice", 200.0),
        ExtractedIngredient::new("broccoli", 100.0),
    ]
}

fn awkward_inputs() -> Vec<Vec<ExtractedIngredient>> {
    vec![
        vec![],
        scenario_one(),
        vec![ExtractedIngredient::unquantified("rice")],
        vec![
            ExtractedIngredient::new("chicken tikka masala", 350.0),
            ExtractedIngredient::new("naan", f64::NAN),
            ExtractedIngredient::new("mango lassi", -20.0),
            ExtractedIngredient::new("white rice", f64::INFINITY),
            ExtractedIngredient::new("ghee", 1.0e9),
        ],
        vec![
            ExtractedIngredient::new("egg", 0.0),
            ExtractedIngredient::new("bacon", 0.0),
        ],
    ]
}

#[test]
fn test_scenario_one_totals() {
    let aggregation = engine().aggregate(&scenario_one());

    assert!(aggregation
        .ingredients
        .iter()
        .all(|item| item.resolution_mode == ResolutionMode::ExactMatch));
    assert_eq!(aggregation.coverage_percentage, 100.0);
    assert_eq!(aggregation.total_mass_g, 450.0);

    let totals = aggregation.total_nutrients;
    // 150 g chicken breast (165) + 200 g brown rice (123) + 100 g broccoli (35)
    assert!((totals.calories - 528.5).abs() < 1e-9);
    assert!((totals.protein_g - (46.5 + 5.4 + 2.4)).abs() < 1e-9);

    let names: Vec<&str> = aggregation
        .resolution_sources
        .iter()
        .map(|source| source.name.as_str())
        .collect();
    assert_eq!(names, ["chicken breast", "brown rice", "broccoli"]);
}

#[test]
fn test_aggregation_is_deterministic() {
    let engine = engine();
    for input in awkward_inputs() {
        let first = engine.aggregate(&input);
        let second = engine.aggregate(&input);
        assert_eq!(
            first.total_nutrients.calories.to_bits(),
            second.total_nutrients.calories.to_bits()
        );
        assert_eq!(
            first.coverage_percentage.to_bits(),
            second.coverage_percentage.to_bits()
        );
        assert_eq!(first.resolution_sources, second.resolution_sources);
    }
}

#[test]
fn test_coverage_bounds_and_non_negative_totals() {
    let engine = engine();
    for input in awkward_inputs() {
        let aggregation = engine.aggregate(&input);
        assert!((0.0..=100.0).contains(&aggregation.coverage_percentage));
        assert!(aggregation.total_nutrients.is_non_negative());
        for item in &aggregation.ingredients {
            assert!(item.quantity_g.is_finite() && item.quantity_g >= 0.0);
        }
    }
}

#[test]
fn test_recompute_matches_reported_coverage() {
    let engine = engine();
    for input in awkward_inputs() {
        let aggregation = engine.aggregate(&input);
        assert_eq!(
            recompute_coverage(&aggregation.resolution_sources).to_bits(),
            aggregation.coverage_percentage.to_bits()
        );
    }
}

#[test]
fn test_fuzzy_matches_count_toward_coverage() {
    let aggregation = engine().aggregate(&[
        ExtractedIngredient::new("tomatoes", 100.0),
        ExtractedIngredient::new("rice", 100.0),
    ]);
    let rules: Vec<Option<FuzzyRule>> = aggregation
        .ingredients
        .iter()
        .map(|item| item.fuzzy_rule)
        .collect();
    assert_eq!(rules, [Some(FuzzyRule::Plural), Some(FuzzyRule::Synonym)]);
    assert_eq!(aggregation.coverage_percentage, 100.0);
}

#[test]
fn test_unmatched_ingredient_uses_category_fallback() {
    let aggregation = engine().aggregate(&[
        ExtractedIngredient::new("chicken breast", 100.0),
        ExtractedIngredient::new("mystery stew", 100.0),
    ]);
    let stew = &aggregation.ingredients[1];
    assert_eq!(stew.resolution_mode, ResolutionMode::Estimated);
    assert!(stew.matched_entry.is_none());
    assert_eq!(stew.fallback_category, Some(FoodCategory::MixedDish));
    assert_eq!(
        aggregation.resolution_sources[1].name,
        format!("{ESTIMATED_SOURCE_PREFIX}mixed_dish")
    );
    assert!(stew.contributed_nutrients.calories > 0.0);

    assert_eq!(aggregation.coverage_percentage, 50.0);
    assert_eq!(aggregation.coverage_confidence(), ConfidenceLevel::MediumLow);
}

#[test]
fn test_implausible_quantity_is_replaced_by_typical_portion() {
    let aggregation = engine().aggregate(&[ExtractedIngredient::new("broccoli", 80_000.0)]);
    let item = &aggregation.ingredients[0];
    assert_eq!(item.quantity_source, QuantitySource::Defaulted);
    assert!(item.quantity_g > 0.0 && item.quantity_g <= 5000.0);
}

#[test]
fn test_zero_mass_meal() {
    let aggregation = engine().aggregate(&[
        ExtractedIngredient::new("egg", 0.0),
        ExtractedIngredient::unquantified("toast"),
    ]);
    assert!(aggregation.is_zero_mass());
    assert_eq!(aggregation.coverage_percentage, 0.0);
    assert_eq!(aggregation.coverage_confidence(), ConfidenceLevel::Low);
    assert_eq!(aggregation.total_nutrients.calories, 0.0);
    assert!(aggregation
        .ingredients
        .iter()
        .all(|item| item.quantity_source == QuantitySource::Unspecified));
}

#[test]
fn test_confidence_is_downgrade_only() {
    for seed in ConfidenceLevel::ALL {
        for coverage in [0.0, 39.9, 40.0, 59.9, 60.0, 79.9, 80.0, 100.0] {
            let combined = combine_confidence(seed, coverage, false);
            assert!(combined <= seed, "{seed:?} {coverage}");
        }
    }
    assert_eq!(
        combine_confidence(ConfidenceLevel::Medium, 100.0, false),
        ConfidenceLevel::Medium
    );
    assert_eq!(
        combine_confidence(ConfidenceLevel::High, 65.0, false),
        ConfidenceLevel::Medium
    );
}
