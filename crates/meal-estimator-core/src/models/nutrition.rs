// ABOUTME: Nutrient profile model and meal type tag
// ABOUTME: NutrientProfile supports scaling and ordered summation for aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal type
    Other,
}

impl MealType {
    /// Parse meal type from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" | "supper" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
            Self::Other => "Meal",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed nutrient field set
///
/// Used both for per-100 g reference values and for absolute contributions
/// at a given quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Total fat in grams
    pub fat_g: f64,
    /// Sodium in milligrams
    pub sodium_mg: f64,
    /// Sugars in grams
    pub sugar_g: f64,
    /// Dietary fiber in grams
    pub fiber_g: f64,
}

impl NutrientProfile {
    /// Field names in declaration order, matching `values()`
    pub const FIELD_NAMES: [&'static str; 7] = [
        "calories",
        "protein_g",
        "carbs_g",
        "fat_g",
        "sodium_mg",
        "sugar_g",
        "fiber_g",
    ];

    /// Profile with every field at zero
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            sodium_mg: 0.0,
            sugar_g: 0.0,
            fiber_g: 0.0,
        }
    }

    /// Field values in declaration order
    #[must_use]
    pub const fn values(&self) -> [f64; 7] {
        [
            self.calories,
            self.protein_g,
            self.carbs_g,
            self.fat_g,
            self.sodium_mg,
            self.sugar_g,
            self.fiber_g,
        ]
    }

    /// Multiply every field by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
            sodium_mg: self.sodium_mg * factor,
            sugar_g: self.sugar_g * factor,
            fiber_g: self.fiber_g * factor,
        }
    }

    /// Contribution of `quantity_g` grams of a food with this per-100 g profile
    #[must_use]
    pub fn for_quantity(&self, quantity_g: f64) -> Self {
        self.scaled(quantity_g / 100.0)
    }

    /// Name of the first negative or non-finite field, if any
    #[must_use]
    pub fn first_invalid_field(&self) -> Option<(&'static str, f64)> {
        Self::FIELD_NAMES
            .iter()
            .zip(self.values())
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
            .map(|(name, value)| (*name, value))
    }

    /// True when every field is finite and non-negative
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.first_invalid_field().is_none()
    }
}

impl Add for NutrientProfile {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
            sodium_mg: self.sodium_mg + rhs.sodium_mg,
            sugar_g: self.sugar_g + rhs.sugar_g,
            fiber_g: self.fiber_g + rhs.fiber_g,
        }
    }
}

impl AddAssign for NutrientProfile {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

// Folds left to right, so identical input order gives bit-identical totals.
impl Sum for NutrientProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for NutrientProfile {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicken() -> NutrientProfile {
        NutrientProfile {
            calories: 165.0,
            protein_g: 31.0,
            carbs_g: 0.0,
            fat_g: 3.6,
            sodium_mg: 74.0,
            sugar_g: 0.0,
            fiber_g: 0.0,
        }
    }

    #[test]
    fn test_for_quantity_scales_per_100g() {
        let portion = chicken().for_quantity(150.0);
        assert!((portion.calories - 247.5).abs() < 1e-9);
        assert!((portion.protein_g - 46.5).abs() < 1e-9);
    }

    #[test]
    fn test_first_invalid_field_reports_negative_value() {
        let mut profile = chicken();
        profile.sodium_mg = -1.0;
        assert_eq!(profile.first_invalid_field(), Some(("sodium_mg", -1.0)));
        assert!(!profile.is_non_negative());
    }

    #[test]
    fn test_non_finite_values_are_invalid() {
        let mut profile = chicken();
        profile.fat_g = f64::NAN;
        assert_eq!(profile.first_invalid_field().map(|(name, _)| name), Some("fat_g"));
    }

    #[test]
    fn test_sum_of_profiles() {
        let total: NutrientProfile = [chicken(), chicken()].iter().sum();
        assert!((total.calories - 330.0).abs() < 1e-9);
    }

    #[test]
    fn test_meal_type_from_str_lossy() {
        assert_eq!(MealType::from_str_lossy(" Lunch "), MealType::Lunch);
        assert_eq!(MealType::from_str_lossy("brunch"), MealType::Other);
    }
}
