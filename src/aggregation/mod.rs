// ABOUTME: Coverage and aggregation engine resolving extracted ingredients against the reference
// ABOUTME: Sums nutrient contributions, derives coverage from matched mass, and combines confidence tiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coverage & Aggregation Engine
//!
//! For each extracted ingredient:
//!
//! 1. normalize the raw name (lowercase, drop preparation qualifiers)
//! 2. look it up in the reference: exact match, fuzzy match, or no match
//! 3. scale the matched per-100 g profile (or the category fallback profile
//!    for unmatched names) to the re-validated quantity
//!
//! Totals are summed in input order, so identical input against the same
//! reference snapshot yields bit-identical totals and coverage.
//!
//! Coverage is the share of total mass resolved through the reference.
//! It is derived from the [`ResolutionSource`] list alone, so
//! [`recompute_coverage`] on a stored result always reproduces it.

mod fallback;
mod quantity;

pub use fallback::FoodCategory;
pub use quantity::{sanitize_quantity, QuantitySource, SanitizedQuantity};

use meal_estimator_core::models::{ConfidenceLevel, NutrientProfile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::constants::coverage_thresholds::{
    HIGH_MIN_PERCENT, MEDIUM_LOW_MIN_PERCENT, MEDIUM_MIN_PERCENT,
};
use crate::extraction::ExtractedIngredient;
use crate::logging::AnalysisLogger;
use crate::reference::normalize::normalize_ingredient_name;
use crate::reference::{CompositionEntry, FoodCompositionReference, FuzzyRule, MatchKind};

/// Prefix of the source name recorded for fallback-estimated ingredients
pub const ESTIMATED_SOURCE_PREFIX: &str = "estimated:";

/// How an ingredient was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionMode {
    /// Case-insensitive exact reference match
    ExactMatch,
    /// Singular/plural or synonym reference match
    FuzzyMatch,
    /// No reference match; category fallback profile
    Estimated,
}

impl ResolutionMode {
    /// Whether the nutrients come from the reference table
    #[must_use]
    pub const fn is_reference_backed(self) -> bool {
        matches!(self, Self::ExactMatch | Self::FuzzyMatch)
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactMatch => "EXACT_MATCH",
            Self::FuzzyMatch => "FUZZY_MATCH",
            Self::Estimated => "ESTIMATED",
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted ingredient after resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIngredient {
    /// Name as produced by the extraction service
    pub raw_name: String,
    /// Name after normalization, used for lookup
    pub normalized_name: String,
    /// Re-validated mass in grams
    pub quantity_g: f64,
    /// Provenance of `quantity_g`
    pub quantity_source: QuantitySource,
    /// Reference row used, if any
    pub matched_entry: Option<CompositionEntry>,
    /// Exact, fuzzy or estimated
    pub resolution_mode: ResolutionMode,
    /// Fuzzy rule for `FUZZY_MATCH`
    pub fuzzy_rule: Option<FuzzyRule>,
    /// Fallback category for `ESTIMATED`
    pub fallback_category: Option<FoodCategory>,
    /// Nutrients attributed to this ingredient at `quantity_g`
    pub contributed_nutrients: NutrientProfile,
}

impl ResolvedIngredient {
    /// Transparency record for this ingredient
    #[must_use]
    pub fn source(&self) -> ResolutionSource {
        let name = match (&self.matched_entry, self.fallback_category) {
            (Some(entry), _) => entry.canonical_name.clone(),
            (None, Some(category)) => format!("{ESTIMATED_SOURCE_PREFIX}{category}"),
            (None, None) => format!("{ESTIMATED_SOURCE_PREFIX}{}", FoodCategory::MixedDish),
        };
        ResolutionSource {
            name,
            mode: self.resolution_mode,
            quantity_g: self.quantity_g,
        }
    }
}

/// Transparency record: which data backed each ingredient, and at what mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSource {
    /// Canonical reference name, or `estimated:<category>`
    pub name: String,
    /// How the ingredient was resolved
    pub mode: ResolutionMode,
    /// Mass counted toward coverage
    pub quantity_g: f64,
}

/// Output of one aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Resolved ingredients in input order
    pub ingredients: Vec<ResolvedIngredient>,
    /// Sum of all contributions
    pub total_nutrients: NutrientProfile,
    /// Share of mass resolved through the reference, 0..=100
    pub coverage_percentage: f64,
    /// One record per ingredient, in input order
    pub resolution_sources: Vec<ResolutionSource>,
    /// Sum of all ingredient masses
    pub total_mass_g: f64,
    /// Mass resolved through the reference
    pub matched_mass_g: f64,
}

impl Aggregation {
    /// True when no ingredient carried any mass
    #[must_use]
    pub fn is_zero_mass(&self) -> bool {
        self.total_mass_g <= 0.0
    }

    /// Tier supported by the data coverage alone (LOW for zero-mass meals)
    #[must_use]
    pub fn coverage_confidence(&self) -> ConfidenceLevel {
        if self.is_zero_mass() {
            ConfidenceLevel::Low
        } else {
            coverage_tier(self.coverage_percentage)
        }
    }

    /// Ingredients that fell back to a category estimate
    pub fn estimated(&self) -> impl Iterator<Item = &ResolvedIngredient> {
        self.ingredients
            .iter()
            .filter(|ingredient| ingredient.resolution_mode == ResolutionMode::Estimated)
    }
}

/// Matched and total mass over a source list, summed in order
fn mass_totals(sources: &[ResolutionSource]) -> (f64, f64) {
    sources
        .iter()
        .fold((0.0, 0.0), |(matched, total), source| {
            let matched = if source.mode.is_reference_backed() {
                matched + source.quantity_g
            } else {
                matched
            };
            (matched, total + source.quantity_g)
        })
}

fn coverage_from_mass(matched_mass_g: f64, total_mass_g: f64) -> f64 {
    if total_mass_g > 0.0 {
        (matched_mass_g / total_mass_g * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Re-derive coverage from stored resolution records
///
/// Produces exactly the value [`AggregationEngine::aggregate`] reported for
/// the same records; zero total mass gives 0.
#[must_use]
pub fn recompute_coverage(sources: &[ResolutionSource]) -> f64 {
    let (matched, total) = mass_totals(sources);
    coverage_from_mass(matched, total)
}

/// Confidence tier supported by a coverage percentage
#[must_use]
pub fn coverage_tier(coverage_percentage: f64) -> ConfidenceLevel {
    if coverage_percentage >= HIGH_MIN_PERCENT {
        ConfidenceLevel::High
    } else if coverage_percentage >= MEDIUM_MIN_PERCENT {
        ConfidenceLevel::Medium
    } else if coverage_percentage >= MEDIUM_LOW_MIN_PERCENT {
        ConfidenceLevel::MediumLow
    } else {
        ConfidenceLevel::Low
    }
}

/// Final tier: the lower of the input seed and the coverage tier
///
/// Never exceeds `seed`. A zero-mass meal is always LOW.
#[must_use]
pub fn combine_confidence(
    seed: ConfidenceLevel,
    coverage_percentage: f64,
    zero_mass: bool,
) -> ConfidenceLevel {
    if zero_mass {
        return ConfidenceLevel::Low;
    }
    ConfidenceLevel::min_of(seed, coverage_tier(coverage_percentage))
}

/// Resolves ingredients against a shared reference snapshot
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    reference: Arc<FoodCompositionReference>,
}

impl AggregationEngine {
    /// Engine over the given snapshot
    #[must_use]
    pub const fn new(reference: Arc<FoodCompositionReference>) -> Self {
        Self { reference }
    }

    /// Snapshot in use
    #[must_use]
    pub fn reference(&self) -> &FoodCompositionReference {
        &self.reference
    }

    /// Resolve one ingredient
    #[must_use]
    pub fn resolve(&self, ingredient: &ExtractedIngredient) -> ResolvedIngredient {
        let normalized_name = normalize_ingredient_name(&ingredient.raw_name);

        let (matched_entry, resolution_mode, fuzzy_rule, fallback_category, per_100g, category) =
            match self.reference.lookup(&normalized_name) {
                Some(found) => {
                    let (mode, rule) = match found.kind {
                        MatchKind::Exact => (ResolutionMode::ExactMatch, None),
                        MatchKind::Fuzzy(rule) => (ResolutionMode::FuzzyMatch, Some(rule)),
                    };
                    (
                        Some(found.entry.clone()),
                        mode,
                        rule,
                        None,
                        found.entry.nutrients_per_100g,
                        FoodCategory::classify(&found.entry.canonical_name),
                    )
                }
                None => {
                    let category = FoodCategory::classify(&normalized_name);
                    (
                        None,
                        ResolutionMode::Estimated,
                        None,
                        Some(category),
                        category.fallback_profile(),
                        category,
                    )
                }
            };

        let quantity = sanitize_quantity(
            ingredient.estimated_quantity_g,
            category.typical_portion_g(),
        );

        let resolved = ResolvedIngredient {
            raw_name: ingredient.raw_name.clone(),
            normalized_name,
            quantity_g: quantity.grams,
            quantity_source: quantity.source,
            matched_entry,
            resolution_mode,
            fuzzy_rule,
            fallback_category,
            contributed_nutrients: per_100g.for_quantity(quantity.grams),
        };

        AnalysisLogger::log_ingredient_resolved(
            &resolved.raw_name,
            &resolved.source().name,
            resolution_mode.as_str(),
            resolved.quantity_g,
        );
        resolved
    }

    /// Resolve every ingredient and aggregate totals and coverage
    #[must_use]
    pub fn aggregate(&self, ingredients: &[ExtractedIngredient]) -> Aggregation {
        let ingredients: Vec<ResolvedIngredient> =
            ingredients.iter().map(|item| self.resolve(item)).collect();

        let total_nutrients: NutrientProfile = ingredients
            .iter()
            .map(|ingredient| &ingredient.contributed_nutrients)
            .sum();
        let resolution_sources: Vec<ResolutionSource> =
            ingredients.iter().map(ResolvedIngredient::source).collect();
        let (matched_mass_g, total_mass_g) = mass_totals(&resolution_sources);

        Aggregation {
            ingredients,
            total_nutrients,
            coverage_percentage: coverage_from_mass(matched_mass_g, total_mass_g),
            resolution_sources,
            total_mass_g,
            matched_mass_g,
        }
    }
}
