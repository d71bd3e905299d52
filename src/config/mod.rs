// ABOUTME: Configuration management for the analyzer and the extraction service client
// ABOUTME: Environment-only configuration with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables; there is no configuration
//! file. Every setting has a default, and invalid values are reported as
//! [`ConfigError`] rather than silently replaced.
//!
//! - **Analyzer**: extraction timeout, retries, input limits, reference path
//! - **Extraction**: OpenAI-compatible endpoint, model and credentials

mod analyzer;
mod error;
mod extraction;

pub use analyzer::AnalyzerConfig;
pub use error::ConfigError;
pub use extraction::LlmExtractorConfig;

use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Read and parse an optional environment variable
///
/// Unset or blank variables yield `None`.
pub(crate) fn parse_env<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConfigError::Parse {
                    key,
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}

/// Read an optional, non-blank string environment variable
pub(crate) fn string_env(key: &'static str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
