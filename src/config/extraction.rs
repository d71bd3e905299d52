// ABOUTME: Settings for the OpenAI-compatible ingredient extraction endpoint
// ABOUTME: Base URL, model, optional API key and vision support from MEAL_LLM_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_env, string_env, ConfigError};
use crate::constants::env_vars;

/// Default base URL (local Ollama)
const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default vision-capable model for local inference
const DEFAULT_MODEL: &str = "llama3.2-vision:11b";

/// Configuration for [`crate::extraction::LlmIngredientExtractor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmExtractorConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Whether the model accepts image input
    pub vision: bool,
}

impl Default for LlmExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            vision: true,
        }
    }
}

impl LlmExtractorConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - `MEAL_LLM_BASE_URL`: base URL (default: Ollama at localhost:11434)
    /// - `MEAL_LLM_MODEL`: model name
    /// - `MEAL_LLM_API_KEY`: API key (optional)
    /// - `MEAL_LLM_VISION`: `true`/`false` (default `true`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or `MEAL_LLM_VISION`
    /// is not a boolean
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url = string_env(env_vars::LLM_BASE_URL).unwrap_or(defaults.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Parse {
                key: env_vars::LLM_BASE_URL,
                value: base_url,
                reason: "expected an http:// or https:// URL".to_owned(),
            });
        }

        Ok(Self {
            base_url,
            model: string_env(env_vars::LLM_MODEL).unwrap_or(defaults.model),
            api_key: string_env(env_vars::LLM_API_KEY),
            vision: parse_env::<bool>(env_vars::LLM_VISION)?.unwrap_or(defaults.vision),
        })
    }
}
