// ABOUTME: Category-level fallback nutrient profiles for ingredients missing from the reference
// ABOUTME: Keyword classification into broad food categories with typical portion sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use meal_estimator_core::models::NutrientProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reference::normalize::singularize_word;

/// Broad food category used when an ingredient has no reference entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    /// Meat, poultry, fish, eggs, tofu
    Protein,
    /// Bread, rice, pasta, cereals
    Grain,
    /// Non-starchy and starchy vegetables
    Vegetable,
    /// Fresh and dried fruit
    Fruit,
    /// Milk, yogurt, cheese
    Dairy,
    /// Beans, lentils, peas
    Legume,
    /// Nuts and seeds
    NutSeed,
    /// Oils, butter, dressings
    FatOil,
    /// Desserts, candy, pastries
    Sweet,
    /// Drinks
    Beverage,
    /// Composite dishes and anything unclassified
    MixedDish,
}

/// Classification order: composite dishes first so "chicken curry" is a dish, not a protein
const CLASSIFICATION_ORDER: [(FoodCategory, &[&str]); 10] = [
    (
        FoodCategory::MixedDish,
        &[
            "curry", "stew", "soup", "salad", "sandwich", "burger", "pizza", "casserole",
            "lasagna", "burrito", "taco", "wrap", "pie", "risotto", "paella", "chili", "sushi",
            "dumpling", "omelette", "omelet", "stir-fry", "noodle", "ramen", "pho", "bowl",
        ],
    ),
    (
        FoodCategory::Beverage,
        &[
            "coffee", "tea", "juice", "soda", "cola", "beer", "wine", "smoothie", "latte",
            "cappuccino", "water", "lemonade", "drink", "shake", "kombucha",
        ],
    ),
    (
        FoodCategory::Sweet,
        &[
            "cake", "cookie", "brownie", "chocolate", "candy", "ice", "donut",
            "doughnut", "pastry", "croissant", "muffin", "dessert", "pudding", "sugar", "honey",
            "syrup", "jam", "tart", "cupcake",
        ],
    ),
    (
        FoodCategory::NutSeed,
        &[
            "almond", "walnut", "peanut", "cashew", "pecan", "pistachio", "hazelnut", "nut",
            "seed", "chia", "flax", "sesame", "tahini",
        ],
    ),
    (
        FoodCategory::Dairy,
        &[
            "milk", "yogurt", "yoghurt", "cheese", "kefir", "cottage", "ricotta", "mozzarella",
            "parmesan", "feta", "cheddar",
        ],
    ),
    (
        FoodCategory::Legume,
        &[
            "bean", "lentil", "chickpea", "pea", "edamame", "hummus", "dal", "dhal", "soybean",
        ],
    ),
    (
        FoodCategory::Protein,
        &[
            "chicken", "beef", "pork", "lamb", "turkey", "duck", "fish", "salmon", "tuna", "cod",
            "shrimp", "prawn", "egg", "tofu", "tempeh", "steak", "bacon", "ham", "sausage",
            "meat", "veal", "venison", "crab", "lobster", "sardine", "mackerel", "tilapia",
        ],
    ),
    (
        FoodCategory::Grain,
        &[
            "rice", "bread", "pasta", "spaghetti", "oat", "oatmeal", "cereal", "quinoa",
            "couscous", "barley", "tortilla", "bagel", "cracker", "toast", "bun", "roll",
            "granola", "flour", "corn", "polenta", "bulgur",
        ],
    ),
    (
        FoodCategory::FatOil,
        &[
            "oil", "butter", "margarine", "mayonnaise", "mayo", "dressing", "ghee", "lard",
            "vinaigrette",
        ],
    ),
    (
        FoodCategory::Fruit,
        &[
            "apple", "banana", "orange", "berry", "blueberry", "strawberry", "raspberry",
            "grape", "mango", "pineapple", "melon", "watermelon", "peach", "pear", "plum", "cherry", "kiwi", "fig", "date", "apricot",
            "raisin", "fruit", "papaya", "lemon", "lime",
        ],
    ),
];

/// Words that mark a vegetable; checked after every other category
const VEGETABLE_KEYWORDS: &[&str] = &[
    "broccoli", "spinach", "carrot", "lettuce", "kale", "cabbage", "tomato", "cucumber",
    "pepper", "onion", "garlic", "zucchini", "eggplant", "mushroom", "celery", "asparagus",
    "cauliflower", "potato", "squash", "pumpkin", "beet", "radish", "leek", "green", "chard",
    "vegetable", "veggie", "sprout", "artichoke", "okra", "arugula",
];

impl FoodCategory {
    /// Every category
    pub const ALL: [Self; 11] = [
        Self::Protein,
        Self::Grain,
        Self::Vegetable,
        Self::Fruit,
        Self::Dairy,
        Self::Legume,
        Self::NutSeed,
        Self::FatOil,
        Self::Sweet,
        Self::Beverage,
        Self::MixedDish,
    ];

    /// Classify a (normalized) food name by keyword; unknown names are mixed dishes
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let words: Vec<String> = name
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|word| !word.is_empty())
            .map(|word| singularize_word(&word.to_lowercase()))
            .collect();
        let has_keyword = |keywords: &[&str]| {
            words
                .iter()
                .any(|word| keywords.contains(&word.as_str()))
        };

        CLASSIFICATION_ORDER
            .iter()
            .find(|(_, keywords)| has_keyword(*keywords))
            .map(|(category, _)| *category)
            .or_else(|| has_keyword(VEGETABLE_KEYWORDS).then_some(Self::Vegetable))
            .unwrap_or(Self::MixedDish)
    }

    /// Default nutrient profile per 100 g for foods of this category
    #[must_use]
    pub const fn fallback_profile(self) -> NutrientProfile {
        let (calories, protein_g, carbs_g, fat_g, sodium_mg, sugar_g, fiber_g) = match self {
            Self::Protein => (200.0, 25.0, 0.5, 11.0, 75.0, 0.0, 0.0),
            Self::Grain => (150.0, 4.5, 30.0, 1.5, 150.0, 1.0, 2.0),
            Self::Vegetable => (35.0, 2.0, 7.0, 0.3, 30.0, 3.0, 2.5),
            Self::Fruit => (55.0, 0.7, 14.0, 0.2, 1.0, 10.0, 2.2),
            Self::Dairy => (120.0, 8.0, 6.0, 7.0, 100.0, 5.0, 0.0),
            Self::Legume => (130.0, 8.0, 22.0, 1.0, 200.0, 1.5, 7.0),
            Self::NutSeed => (580.0, 20.0, 20.0, 50.0, 5.0, 4.0, 8.0),
            Self::FatOil => (800.0, 0.5, 0.5, 88.0, 200.0, 0.3, 0.0),
            Self::Sweet => (420.0, 5.0, 60.0, 18.0, 200.0, 40.0, 2.0),
            Self::Beverage => (40.0, 0.5, 9.0, 0.3, 5.0, 8.0, 0.2),
            Self::MixedDish => (150.0, 7.0, 15.0, 7.0, 400.0, 2.5, 1.5),
        };
        NutrientProfile {
            calories,
            protein_g,
            carbs_g,
            fat_g,
            sodium_mg,
            sugar_g,
            fiber_g,
        }
    }

    /// Typical single-portion mass in grams
    #[must_use]
    pub const fn typical_portion_g(self) -> f64 {
        match self {
            Self::Protein => 120.0,
            Self::Grain | Self::Dairy => 150.0,
            Self::Vegetable => 90.0,
            Self::Fruit | Self::Legume => 130.0,
            Self::NutSeed => 30.0,
            Self::FatOil => 14.0,
            Self::Sweet => 50.0,
            Self::Beverage => 250.0,
            Self::MixedDish => 300.0,
        }
    }

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Grain => "grain",
            Self::Vegetable => "vegetable",
            Self::Fruit => "fruit",
            Self::Dairy => "dairy",
            Self::Legume => "legume",
            Self::NutSeed => "nut_seed",
            Self::FatOil => "fat_oil",
            Self::Sweet => "sweet",
            Self::Beverage => "beverage",
            Self::MixedDish => "mixed_dish",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
