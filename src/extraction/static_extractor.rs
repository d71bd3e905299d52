// ABOUTME: Extractor returning a preconfigured outcome, for tests and offline callers
// ABOUTME: Can fail, report empty, delay, or fail a fixed number of times before succeeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::sleep;

use super::{
    ExtractedIngredient, ExtractionError, ExtractionRequest, ExtractorCapabilities,
    IngredientExtractor,
};

#[derive(Debug, Clone)]
enum Outcome {
    Ingredients(Vec<ExtractedIngredient>),
    Failure(ExtractionError),
}

/// Extractor with a fixed answer
///
/// ```rust
/// use meal_estimator::extraction::{ExtractedIngredient, StaticIngredientExtractor};
///
/// let extractor = StaticIngredientExtractor::with_ingredients(vec![
///     ExtractedIngredient::new("chicken breast", 150.0),
/// ]);
/// assert_eq!(extractor.call_count(), 0);
/// ```
#[derive(Debug)]
pub struct StaticIngredientExtractor {
    outcome: Outcome,
    delay: Option<Duration>,
    initial_failures: u32,
    capabilities: ExtractorCapabilities,
    calls: AtomicU32,
}

impl StaticIngredientExtractor {
    fn from_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: None,
            initial_failures: 0,
            capabilities: ExtractorCapabilities::VISION | ExtractorCapabilities::JSON_MODE,
            calls: AtomicU32::new(0),
        }
    }

    /// Always return these ingredients (an empty list reports `Empty`)
    #[must_use]
    pub fn with_ingredients(ingredients: Vec<ExtractedIngredient>) -> Self {
        Self::from_outcome(Outcome::Ingredients(ingredients))
    }

    /// Always fail as unavailable
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::from_outcome(Outcome::Failure(ExtractionError::unavailable(reason)))
    }

    /// Always report that nothing was identified
    #[must_use]
    pub fn empty() -> Self {
        Self::from_outcome(Outcome::Failure(ExtractionError::Empty))
    }

    /// Sleep before answering
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail as unavailable on the first `count` calls
    #[must_use]
    pub const fn with_initial_failures(mut self, count: u32) -> Self {
        self.initial_failures = count;
        self
    }

    /// Override the advertised capabilities
    #[must_use]
    pub const fn with_capabilities(mut self, capabilities: ExtractorCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Number of `extract` calls so far
    #[must_use]
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IngredientExtractor for StaticIngredientExtractor {
    fn name(&self) -> &'static str {
        "static"
    }

    fn capabilities(&self) -> ExtractorCapabilities {
        self.capabilities
    }

    async fn extract(
        &self,
        _request: &ExtractionRequest,
    ) -> Result<Vec<ExtractedIngredient>, ExtractionError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        if call < self.initial_failures {
            return Err(ExtractionError::unavailable(format!(
                "scripted failure {} of {}",
                call + 1,
                self.initial_failures
            )));
        }

        match &self.outcome {
            Outcome::Ingredients(items) if items.is_empty() => Err(ExtractionError::Empty),
            Outcome::Ingredients(items) => Ok(items.clone()),
            Outcome::Failure(error) => Err(error.clone()),
        }
    }
}
