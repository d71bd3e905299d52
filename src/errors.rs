// ABOUTME: Analysis error kinds surfaced by MealAnalyzer::analyze
// ABOUTME: Converts domain errors into the unified AppError from the core crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Errors
//!
//! Only four conditions are errors. Unmatched ingredients and zero coverage
//! are valid outcomes reported through a LOW confidence result.

pub use meal_estimator_core::errors::{AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse};

use crate::extraction::ExtractionError;
use crate::reference::ReferenceLoadError;
use serde_json::json;
use thiserror::Error;

/// Failure of a single `analyze` call
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Rejected before any extraction call was attempted
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// External service unreachable, timed out, or returned malformed output
    #[error("Ingredient extraction unavailable: {reason}")]
    ExtractionUnavailable {
        /// Transport or parse failure description
        reason: String,
    },

    /// External service responded but identified no ingredients
    #[error("Could not identify any ingredients in the meal")]
    ExtractionEmpty,

    /// Reference snapshot could not be loaded (startup only)
    #[error(transparent)]
    ReferenceLoad(#[from] ReferenceLoadError),
}

impl AnalysisError {
    /// Invalid input with the given reason
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Stable error code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
            Self::ExtractionUnavailable { .. } => ErrorCode::ExtractionUnavailable,
            Self::ExtractionEmpty => ErrorCode::ExtractionEmpty,
            Self::ReferenceLoad(_) => ErrorCode::ReferenceLoadError,
        }
    }

    /// Whether the caller may retry the identical request
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }
}

impl From<ExtractionError> for AnalysisError {
    fn from(error: ExtractionError) -> Self {
        match error {
            ExtractionError::Unavailable { reason } => Self::ExtractionUnavailable { reason },
            ExtractionError::Empty => Self::ExtractionEmpty,
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        let code = error.code();
        let message = error.to_string();
        let app_error = Self::new(code, message).with_details(json!({
            "retryable": code.is_retryable(),
        }));
        match error {
            AnalysisError::ReferenceLoad(source) => app_error.with_source(source),
            _ => app_error,
        }
    }
}

impl From<ReferenceLoadError> for AppError {
    fn from(error: ReferenceLoadError) -> Self {
        AnalysisError::from(error).into()
    }
}
