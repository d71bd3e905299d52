// ABOUTME: Core data models shared by every stage of meal analysis
// ABOUTME: Re-exports NutrientProfile, ConfidenceLevel and MealType
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `NutrientProfile`: the fixed nutrient field set, per 100 g or absolute
//! - `ConfidenceLevel`: ordered trust tier attached to every estimate
//! - `MealType`: breakfast/lunch/dinner/snack tag supplied by the caller

mod confidence;
mod nutrition;

pub use confidence::ConfidenceLevel;
pub use nutrition::{MealType, NutrientProfile};
