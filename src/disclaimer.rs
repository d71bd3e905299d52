// ABOUTME: Maps the final confidence tier to an accuracy band and actionable improvement tips
// ABOUTME: Static tier table plus context-driven tips; pure and deterministic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use meal_estimator_core::models::ConfidenceLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Symmetric accuracy band in percent (`±min` or `±min–max`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccuracyBand {
    /// Lower bound of the band
    pub min_pct: u8,
    /// Upper bound of the band (equal to `min_pct` for a single value)
    pub max_pct: u8,
}

impl AccuracyBand {
    /// Band for a confidence tier
    #[must_use]
    pub const fn for_confidence(level: ConfidenceLevel) -> Self {
        let (min_pct, max_pct) = match level {
            ConfidenceLevel::High => (15, 15),
            ConfidenceLevel::Medium => (20, 25),
            ConfidenceLevel::MediumLow => (30, 35),
            ConfidenceLevel::Low => (40, 50),
        };
        Self { min_pct, max_pct }
    }
}

impl fmt::Display for AccuracyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_pct == self.max_pct {
            write!(f, "±{}%", self.min_pct)
        } else {
            write!(f, "±{}\u{2013}{}%", self.min_pct, self.max_pct)
        }
    }
}

/// Presentation text for one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclaimer {
    /// One-line summary including the accuracy band
    pub headline: String,
    /// Actionable suggestions, tier tips first
    pub tips: Vec<String>,
}

/// Facts about the analysis that select extra tips
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclaimerContext {
    /// Names that fell back to category estimates
    pub unmatched_ingredients: Vec<String>,
    /// Photo supplied without any description
    pub photo_only: bool,
    /// No ingredient carried a quantity
    pub zero_mass: bool,
    /// Quantities replaced by a typical portion
    pub defaulted_quantities: usize,
}

/// Turns a confidence tier into user-facing accuracy text
#[derive(Debug, Clone, Copy, Default)]
pub struct DisclaimerFormatter;

impl DisclaimerFormatter {
    /// New formatter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Accuracy band for a tier
    #[must_use]
    pub const fn accuracy_band(&self, level: ConfidenceLevel) -> AccuracyBand {
        AccuracyBand::for_confidence(level)
    }

    /// Headline and tips for a tier in the given context
    #[must_use]
    pub fn format(&self, level: ConfidenceLevel, context: &DisclaimerContext) -> Disclaimer {
        let band = self.accuracy_band(level);
        let headline = format!("{} Estimated accuracy {band}.", headline_for(level));

        let mut tips: Vec<String> = tier_tips(level).iter().map(|&tip| tip.to_owned()).collect();

        if context.zero_mass {
            tips.push(
                "No portion sizes were identified; add quantities so totals can be calculated."
                    .to_owned(),
            );
        }
        if context.photo_only {
            tips.push(
                "Add a short description to the photo so ingredients and portions can be confirmed."
                    .to_owned(),
            );
        }
        if !context.unmatched_ingredients.is_empty() {
            tips.push(format!(
                "Estimated from food category averages (not in the reference table): {}.",
                context.unmatched_ingredients.join(", ")
            ));
        }
        if context.defaulted_quantities > 0 {
            tips.push(
                "Some quantities looked implausible and were replaced with typical portions."
                    .to_owned(),
            );
        }

        Disclaimer { headline, tips }
    }
}

const fn headline_for(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::High => "High confidence: measured portions matched to reference data.",
        ConfidenceLevel::Medium => "Good estimate: portion sizes were approximated.",
        ConfidenceLevel::MediumLow => "Rough estimate: several values were approximated.",
        ConfidenceLevel::Low => "Low confidence: treat these numbers as a rough guide.",
    }
}

const fn tier_tips(level: ConfidenceLevel) -> &'static [&'static str] {
    match level {
        ConfidenceLevel::High => &["Keep logging weights for consistent tracking."],
        ConfidenceLevel::Medium => {
            &["Add gram weights or cup measures to tighten the estimate."]
        }
        ConfidenceLevel::MediumLow => &[
            "Describe portion sizes, for example \"a bowl of\" or \"150g\".",
            "List each ingredient separately.",
        ],
        ConfidenceLevel::Low => &[
            "Describe what is in the meal and how much of each item.",
            "Weigh portions or use household measures such as cups or tablespoons.",
        ],
    }
}
