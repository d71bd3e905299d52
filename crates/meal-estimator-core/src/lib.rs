// ABOUTME: Core types for the meal nutrition estimator
// ABOUTME: Foundation crate with error handling, nutrient profiles and confidence tiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Meal Estimator Core
//!
//! Foundation crate providing shared types for the meal nutrition estimator.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Nutrient profiles, confidence tiers and meal types

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (`NutrientProfile`, `ConfidenceLevel`, `MealType`)
pub mod models;
