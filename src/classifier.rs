// ABOUTME: Input detail classifier assigning a confidence seed from the raw meal description
// ABOUTME: Detects explicit measurements, portion descriptors and descriptive detail with regex patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Input Detail Classifier
//!
//! Scans the description in priority order:
//!
//! | signal | example | seed |
//! |---|---|---|
//! | explicit measurement | `150g`, `2 cups`, `3 eggs` | HIGH |
//! | portion descriptor | `a bowl of`, `a large plate` | MEDIUM |
//! | descriptive detail | `chicken and rice` | MEDIUM_LOW |
//! | minimal / empty | `lunch`, photo only | LOW |
//!
//! A photo never raises the seed; only the text is scored.

use meal_estimator_core::models::ConfidenceLevel;
use regex::Regex;

use crate::reference::normalize::singularize_word;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Content words needed for descriptive detail
const MIN_CONTENT_WORDS: usize = 2;

/// Shortest word counted as content
const MIN_CONTENT_WORD_CHARS: usize = 3;

static MEASUREMENT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 150g, 1.5 kg, 1/2 cup, 2 tbsp, 250 ml, 3 slices, 8oz
    Regex::new(
        r"(?i)\b\d+(?:[.,/]\d+)?\s*(?:g|gr|grams?|grammes?|kg|kilograms?|mg|ml|millilit(?:er|re)s?|l|lit(?:er|re)s?|oz|ounces?|lbs?|pounds?|cups?|tbsp|tablespoons?|tsp|teaspoons?|slices?|pieces?|pcs?|servings?)\b",
    )
    .ok()
});

static COUNTED_ITEM_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 2 eggs, 3 large pancakes, two bananas, a dozen oysters
    Regex::new(
        r"(?i)\b(?:\d+|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|dozen)\s+(?:(?:small|medium|large|big)\s+)?(?P<noun>[a-z]{3,})",
    )
    .ok()
});

static PORTION_DESCRIPTOR_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: a bowl of, a plate of, a serving of, a handful of, a large portion
    Regex::new(
        r"(?i)\b(?:bowl|plate|serving|handful|portion|glass|mug|cup|scoop|side|piece|slice|spoonful|helping|can|bottle|pinch|dash|splash)s?\s+of\b|\b(?:small|medium|large|big|regular|double|single|half|full)[\s-]+(?:size[d]?|portions?|servings?|bowls?|plates?|orders?|helpings?|glass(?:es)?)\b",
    )
    .ok()
});

/// Nouns after a number that name a time, a person count or a container, not a food
const NON_FOOD_COUNT_NOUNS: &[&str] = &[
    "noon", "midnight", "minute", "min", "hour", "day", "week", "month", "year", "time", "person",
    "people", "friend", "kid", "guest", "bowl", "plate", "serving", "portion", "glass", "mug",
    "scoop", "side", "helping", "handful", "spoonful", "can", "bottle", "order", "bite", "sip",
    "course", "meal", "snack", "calorie", "kcal", "and", "more", "other",
];

/// Words that carry no food detail
const STOP_WORDS: &[&str] = &[
    "the", "and", "with", "some", "for", "had", "ate", "eat", "eaten", "just", "was", "were",
    "from", "have", "has", "meal", "food", "lunch", "dinner", "breakfast", "snack", "supper",
    "today", "tonight", "bit", "little", "also", "plus", "this", "that", "like", "about",
    "maybe", "think", "really", "very", "quick", "something", "stuff", "thing", "things", "photo",
    "picture", "see", "attached", "what", "are", "but", "not", "any",
];

/// Strongest signal found in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailSignal {
    /// Number plus unit, or a counted item
    Measurement,
    /// Portion-size phrase without units
    PortionDescriptor,
    /// Several named foods without quantities
    DescriptiveDetail,
    /// Little or no text
    Minimal,
}

impl DetailSignal {
    /// Seed tier for this signal
    #[must_use]
    pub const fn seed(self) -> ConfidenceLevel {
        match self {
            Self::Measurement => ConfidenceLevel::High,
            Self::PortionDescriptor => ConfidenceLevel::Medium,
            Self::DescriptiveDetail => ConfidenceLevel::MediumLow,
            Self::Minimal => ConfidenceLevel::Low,
        }
    }
}

/// Classifier verdict for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailAssessment {
    /// Confidence seed
    pub seed: ConfidenceLevel,
    /// Signal that decided the seed
    pub signal: DetailSignal,
    /// Text fragment that triggered the signal, if any
    pub evidence: Option<String>,
    /// Whether a photo accompanied the text
    pub has_photo: bool,
    /// Content words found (used for the descriptive-detail rule)
    pub content_words: usize,
}

impl DetailAssessment {
    fn new(signal: DetailSignal, evidence: Option<String>, has_photo: bool, words: usize) -> Self {
        Self {
            seed: signal.seed(),
            signal,
            evidence,
            has_photo,
            content_words: words,
        }
    }
}

/// Assigns the confidence seed from raw input alone
#[derive(Debug, Clone, Copy, Default)]
pub struct InputDetailClassifier;

impl InputDetailClassifier {
    /// New classifier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classify a description; `has_photo` is recorded but never raises the tier
    #[must_use]
    pub fn classify(&self, text: &str, has_photo: bool) -> DetailAssessment {
        let text = text.trim();
        if text.is_empty() {
            return DetailAssessment::new(DetailSignal::Minimal, None, has_photo, 0);
        }

        let words = count_content_words(text);

        if let Some(found) = first_match(&MEASUREMENT_PATTERN, text)
            .or_else(|| counted_item_match(text))
        {
            return DetailAssessment::new(DetailSignal::Measurement, Some(found), has_photo, words);
        }

        if let Some(found) = first_match(&PORTION_DESCRIPTOR_PATTERN, text) {
            return DetailAssessment::new(
                DetailSignal::PortionDescriptor,
                Some(found),
                has_photo,
                words,
            );
        }

        let signal = if words >= MIN_CONTENT_WORDS {
            DetailSignal::DescriptiveDetail
        } else {
            DetailSignal::Minimal
        };
        DetailAssessment::new(signal, None, has_photo, words)
    }
}

fn first_match(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<String> {
    pattern
        .as_ref()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str().to_owned())
}

fn counted_item_match(text: &str) -> Option<String> {
    let re = COUNTED_ITEM_PATTERN.as_ref()?;
    re.captures_iter(text)
        .find(|caps| {
            caps.name("noun").is_some_and(|noun| {
                let noun = singularize_word(&noun.as_str().to_lowercase());
                !NON_FOOD_COUNT_NOUNS.contains(&noun.as_str())
            })
        })
        .and_then(|caps| caps.get(0))
        .map(|m| m.as_str().to_owned())
}

fn count_content_words(text: &str) -> usize {
    text.split(|c: char| !c.is_alphabetic() && c != '\'' && c != '-')
        .map(str::to_lowercase)
        .filter(|word| word.chars().count() >= MIN_CONTENT_WORD_CHARS)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_word_count_ignores_stop_words() {
        assert_eq!(count_content_words("some chicken and rice"), 2);
        assert_eq!(count_content_words("I had lunch"), 0);
    }

    #[test]
    fn test_fraction_measurement() {
        let verdict = InputDetailClassifier::new().classify("1/2 cup oats", false);
        assert_eq!(verdict.signal, DetailSignal::Measurement);
        assert_eq!(verdict.evidence.as_deref(), Some("1/2 cup"));
    }

    #[test]
    fn test_counted_item_skips_non_food_nouns() {
        assert_eq!(counted_item_match("lunch at 12 noon"), None);
        assert_eq!(counted_item_match("2 bowls of soup"), None);
        assert_eq!(
            counted_item_match("dinner for 4 people, 3 tacos").as_deref(),
            Some("3 tacos")
        );
    }
}
