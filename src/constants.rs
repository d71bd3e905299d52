// ABOUTME: Estimator-wide constants: confidence thresholds, quantity limits, env var names
// ABOUTME: Single home for every tunable number the analysis pipeline depends on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Application constants grouped by domain. Values that operators may change
//! at runtime are read through [`crate::config`]; the defaults live here.

/// Service identification used in structured logs
pub mod service_names {
    /// Default service name
    pub const MEAL_ESTIMATOR: &str = "meal-estimator";
}

/// Coverage thresholds (percent) that map reference coverage to a confidence tier
pub mod coverage_thresholds {
    /// At or above this coverage the data supports HIGH confidence
    pub const HIGH_MIN_PERCENT: f64 = 80.0;
    /// At or above this coverage the data supports MEDIUM confidence
    pub const MEDIUM_MIN_PERCENT: f64 = 60.0;
    /// At or above this coverage the data supports `MEDIUM_LOW` confidence
    pub const MEDIUM_LOW_MIN_PERCENT: f64 = 40.0;
}

/// Plausibility limits applied to untrusted extraction output
pub mod quantity_limits {
    /// Smallest accepted per-ingredient quantity in grams
    pub const MIN_QUANTITY_G: f64 = 0.0;
    /// Largest accepted per-ingredient quantity in grams
    pub const MAX_QUANTITY_G: f64 = 5000.0;
}

/// Request limits and extraction defaults
pub mod limits {
    /// Default extraction timeout in seconds
    pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 12;
    /// Smallest configurable extraction timeout in seconds
    pub const MIN_EXTRACTION_TIMEOUT_SECS: u64 = 1;
    /// Largest configurable extraction timeout in seconds
    pub const MAX_EXTRACTION_TIMEOUT_SECS: u64 = 120;
    /// Largest configurable retry count for unavailable extraction
    pub const MAX_EXTRACTION_RETRIES: u32 = 5;
    /// Default image size limit (10 MiB)
    pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
    /// Default description length limit in characters
    pub const DEFAULT_MAX_DESCRIPTION_CHARS: usize = 4000;
    /// Longest generated meal name in characters
    pub const MAX_MEAL_NAME_CHARS: usize = 60;
}

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// Extraction timeout in seconds
    pub const EXTRACTION_TIMEOUT_SECS: &str = "MEAL_EXTRACTION_TIMEOUT_SECS";
    /// Retry count for unavailable extraction
    pub const EXTRACTION_MAX_RETRIES: &str = "MEAL_EXTRACTION_MAX_RETRIES";
    /// Image size limit in bytes
    pub const MAX_IMAGE_BYTES: &str = "MEAL_MAX_IMAGE_BYTES";
    /// Description length limit in characters
    pub const MAX_DESCRIPTION_CHARS: &str = "MEAL_MAX_DESCRIPTION_CHARS";
    /// Path to an alternative reference JSON file
    pub const REFERENCE_PATH: &str = "MEAL_REFERENCE_PATH";
    /// Base URL of the OpenAI-compatible extraction endpoint
    pub const LLM_BASE_URL: &str = "MEAL_LLM_BASE_URL";
    /// Model used for extraction
    pub const LLM_MODEL: &str = "MEAL_LLM_MODEL";
    /// Optional API key for the extraction endpoint
    pub const LLM_API_KEY: &str = "MEAL_LLM_API_KEY";
    /// Whether the extraction model accepts images
    pub const LLM_VISION: &str = "MEAL_LLM_VISION";
}
