// ABOUTME: System prompt for LLM-based ingredient extraction, loaded at compile time
// ABOUTME: Instructs the model to return a JSON ingredient list without nutrient estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prompts are kept in markdown files next to this module.

/// Ingredient extraction system prompt
pub const INGREDIENT_EXTRACTION_PROMPT: &str = include_str!("ingredient_extraction.md");

/// User message for one extraction request
#[must_use]
pub fn user_message(text: &str, meal_type: &str, has_image: bool) -> String {
    let description = text.trim();
    match (description.is_empty(), has_image) {
        (true, _) => format!("Meal type: {meal_type}\nList the ingredients visible in the attached photo."),
        (false, true) => format!(
            "Meal type: {meal_type}\nMeal description: {description}\nA photo of the meal is attached."
        ),
        (false, false) => format!("Meal type: {meal_type}\nMeal description: {description}"),
    }
}
