// ABOUTME: Configuration error types for environment-driven settings
// ABOUTME: Defines error variants for unparseable and out-of-range values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types.

use meal_estimator_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable could not be parsed
    #[error("Failed to parse {key}='{value}': {reason}")]
    Parse {
        /// Environment variable name
        key: &'static str,
        /// Raw value found
        value: String,
        /// Parser message
        reason: String,
    },

    /// Value parsed but lies outside its accepted range
    #[error("Value out of range for {key}: {reason}")]
    ValueOutOfRange {
        /// Environment variable name
        key: &'static str,
        /// Accepted range description
        reason: String,
    },
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string())
    }
}
