// ABOUTME: Converts service-reported quantities (weight, volume, counts) to grams
// ABOUTME: Volumes assume water density; counted items use a per-piece weight table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::reference::normalize::{normalize_ingredient_name, singularize_phrase};

/// Volume conversion constants (to milliliters)
const ML_PER_CUP: f64 = 240.0;
const ML_PER_TBSP: f64 = 15.0;
const ML_PER_TSP: f64 = 5.0;
const ML_PER_LITER: f64 = 1000.0;

/// Weight conversion constants (to grams)
const GRAMS_PER_OZ: f64 = 28.35;
const GRAMS_PER_LB: f64 = 453.6;
const GRAMS_PER_KG: f64 = 1000.0;
const GRAMS_PER_MG: f64 = 0.001;

/// Assumed density for volume units
const GRAMS_PER_ML: f64 = 1.0;

/// Units the extraction service may report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUnit {
    /// g
    Grams,
    /// kg
    Kilograms,
    /// mg
    Milligrams,
    /// oz
    Ounces,
    /// lb
    Pounds,
    /// ml
    Milliliters,
    /// l
    Liters,
    /// cup
    Cups,
    /// tbsp
    Tablespoons,
    /// tsp
    Teaspoons,
    /// Counted items (piece, slice, whole, ...)
    Pieces,
}

impl QuantityUnit {
    /// Parse a unit label; `None` for labels this table does not know
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().trim_end_matches('.').to_lowercase();
        let unit = match label.as_str() {
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Self::Grams,
            "kg" | "kgs" | "kilogram" | "kilograms" => Self::Kilograms,
            "mg" | "milligram" | "milligrams" => Self::Milligrams,
            "oz" | "ounce" | "ounces" => Self::Ounces,
            "lb" | "lbs" | "pound" | "pounds" => Self::Pounds,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Self::Milliliters
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Self::Liters,
            "cup" | "cups" | "c" => Self::Cups,
            "tbsp" | "tablespoon" | "tablespoons" | "tbs" => Self::Tablespoons,
            "tsp" | "teaspoon" | "teaspoons" => Self::Teaspoons,
            "piece" | "pieces" | "pc" | "pcs" | "item" | "items" | "whole" | "slice"
            | "slices" | "unit" | "units" | "each" | "serving" | "servings" | "x" => {
                Self::Pieces
            }
            _ => return None,
        };
        Some(unit)
    }
}

/// Typical weight of one counted item
static GRAMS_PER_PIECE: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([
        ("egg", 50.0),
        ("egg white", 33.0),
        ("banana", 120.0),
        ("apple", 180.0),
        ("orange", 130.0),
        ("pear", 180.0),
        ("peach", 150.0),
        ("kiwi", 75.0),
        ("strawberry", 12.0),
        ("avocado", 150.0),
        ("tomato", 120.0),
        ("potato", 170.0),
        ("sweet potato", 130.0),
        ("carrot", 60.0),
        ("onion", 110.0),
        ("bell pepper", 120.0),
        ("cucumber", 300.0),
        ("bread", 30.0),
        ("white bread", 30.0),
        ("whole wheat bread", 30.0),
        ("toast", 30.0),
        ("bagel", 100.0),
        ("tortilla", 45.0),
        ("pita bread", 60.0),
        ("croissant", 60.0),
        ("muffin", 110.0),
        ("pancake", 75.0),
        ("waffle", 75.0),
        ("cookie", 15.0),
        ("pizza", 110.0),
        ("cheddar cheese", 20.0),
        ("cheese", 20.0),
        ("bacon", 12.0),
        ("sausage", 75.0),
        ("hot dog", 50.0),
        ("chicken breast", 170.0),
        ("chicken thigh", 115.0),
        ("meatball", 30.0),
        ("almond", 1.2),
        ("walnut", 4.0),
        ("date", 24.0),
        ("olive", 4.0),
        ("sushi", 30.0),
        ("dumpling", 25.0),
    ])
});

/// Weight of one counted item, if the food is in the per-piece table
#[must_use]
pub fn grams_per_piece(ingredient_name: &str) -> Option<f64> {
    let normalized = normalize_ingredient_name(ingredient_name);
    GRAMS_PER_PIECE
        .get(normalized.as_str())
        .or_else(|| GRAMS_PER_PIECE.get(singularize_phrase(&normalized).as_str()))
        .copied()
}

/// Convert an amount in `unit` to grams
///
/// A missing unit means grams unless the food is a known countable item,
/// in which case the amount is a count. Unknown units, counts of foods
/// without a per-piece weight, and non-finite amounts yield `None` so the
/// caller treats the quantity as missing.
#[must_use]
pub fn quantity_to_grams(ingredient_name: &str, amount: f64, unit: Option<&str>) -> Option<f64> {
    if !amount.is_finite() {
        return None;
    }

    let unit = match unit.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => QuantityUnit::parse(label)?,
        None if grams_per_piece(ingredient_name).is_some() => QuantityUnit::Pieces,
        None => QuantityUnit::Grams,
    };

    let grams = match unit {
        QuantityUnit::Grams => amount,
        QuantityUnit::Kilograms => amount * GRAMS_PER_KG,
        QuantityUnit::Milligrams => amount * GRAMS_PER_MG,
        QuantityUnit::Ounces => amount * GRAMS_PER_OZ,
        QuantityUnit::Pounds => amount * GRAMS_PER_LB,
        QuantityUnit::Milliliters => amount * GRAMS_PER_ML,
        QuantityUnit::Liters => amount * ML_PER_LITER * GRAMS_PER_ML,
        QuantityUnit::Cups => amount * ML_PER_CUP * GRAMS_PER_ML,
        QuantityUnit::Tablespoons => amount * ML_PER_TBSP * GRAMS_PER_ML,
        QuantityUnit::Teaspoons => amount * ML_PER_TSP * GRAMS_PER_ML,
        QuantityUnit::Pieces => amount * grams_per_piece(ingredient_name)?,
    };
    Some(grams)
}
