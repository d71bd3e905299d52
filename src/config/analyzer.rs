// ABOUTME: Analyzer settings: extraction timeout, retries, input limits and reference source
// ABOUTME: Loaded from MEAL_* environment variables with range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;
use std::time::Duration;

use super::{parse_env, string_env, ConfigError};
use crate::constants::{env_vars, limits};
use crate::reference::{FoodCompositionReference, ReferenceLoadError};

/// Settings for [`crate::analyzer::MealAnalyzer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Upper bound on one extraction call
    pub extraction_timeout: Duration,
    /// Extra attempts after an unavailable extraction (0 disables retry)
    pub max_extraction_retries: u32,
    /// Largest accepted image in bytes
    pub max_image_bytes: usize,
    /// Longest accepted description in characters
    pub max_description_chars: usize,
    /// Alternative reference snapshot; the bundled one is used when unset
    pub reference_path: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extraction_timeout: Duration::from_secs(limits::DEFAULT_EXTRACTION_TIMEOUT_SECS),
            max_extraction_retries: 0,
            max_image_bytes: limits::DEFAULT_MAX_IMAGE_BYTES,
            max_description_chars: limits::DEFAULT_MAX_DESCRIPTION_CHARS,
            reference_path: None,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - `MEAL_EXTRACTION_TIMEOUT_SECS`: 1..=120 (default 12)
    /// - `MEAL_EXTRACTION_MAX_RETRIES`: 0..=5 (default 0)
    /// - `MEAL_MAX_IMAGE_BYTES`: > 0 (default 10 MiB)
    /// - `MEAL_MAX_DESCRIPTION_CHARS`: > 0 (default 4000)
    /// - `MEAL_REFERENCE_PATH`: optional path to a reference JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparseable or out of range
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout_secs = parse_env::<u64>(env_vars::EXTRACTION_TIMEOUT_SECS)?
            .unwrap_or(limits::DEFAULT_EXTRACTION_TIMEOUT_SECS);
        if !(limits::MIN_EXTRACTION_TIMEOUT_SECS..=limits::MAX_EXTRACTION_TIMEOUT_SECS)
            .contains(&timeout_secs)
        {
            return Err(ConfigError::ValueOutOfRange {
                key: env_vars::EXTRACTION_TIMEOUT_SECS,
                reason: format!(
                    "{timeout_secs}s is outside {}..={}s",
                    limits::MIN_EXTRACTION_TIMEOUT_SECS,
                    limits::MAX_EXTRACTION_TIMEOUT_SECS
                ),
            });
        }

        let max_extraction_retries = parse_env::<u32>(env_vars::EXTRACTION_MAX_RETRIES)?
            .unwrap_or(defaults.max_extraction_retries);
        if max_extraction_retries > limits::MAX_EXTRACTION_RETRIES {
            return Err(ConfigError::ValueOutOfRange {
                key: env_vars::EXTRACTION_MAX_RETRIES,
                reason: format!(
                    "{max_extraction_retries} exceeds {}",
                    limits::MAX_EXTRACTION_RETRIES
                ),
            });
        }

        let max_image_bytes = positive(
            env_vars::MAX_IMAGE_BYTES,
            parse_env::<usize>(env_vars::MAX_IMAGE_BYTES)?.unwrap_or(defaults.max_image_bytes),
        )?;
        let max_description_chars = positive(
            env_vars::MAX_DESCRIPTION_CHARS,
            parse_env::<usize>(env_vars::MAX_DESCRIPTION_CHARS)?
                .unwrap_or(defaults.max_description_chars),
        )?;

        Ok(Self {
            extraction_timeout: Duration::from_secs(timeout_secs),
            max_extraction_retries,
            max_image_bytes,
            max_description_chars,
            reference_path: string_env(env_vars::REFERENCE_PATH).map(PathBuf::from),
        })
    }

    /// Set the extraction timeout
    #[must_use]
    pub const fn with_extraction_timeout(mut self, timeout: Duration) -> Self {
        self.extraction_timeout = timeout;
        self
    }

    /// Set the retry count for unavailable extraction
    #[must_use]
    pub const fn with_max_extraction_retries(mut self, retries: u32) -> Self {
        self.max_extraction_retries = retries;
        self
    }

    /// Load the configured reference snapshot (file if set, bundled otherwise)
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot fails to load or validate
    pub fn load_reference(&self) -> Result<FoodCompositionReference, ReferenceLoadError> {
        match &self.reference_path {
            Some(path) => FoodCompositionReference::from_path(path),
            None => FoodCompositionReference::bundled(),
        }
    }
}

fn positive(key: &'static str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::ValueOutOfRange {
            key,
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(value)
}
