// ABOUTME: Ordered confidence tier attached to every nutrition estimate
// ABOUTME: Supports downgrade-only combination through Ord and min_of
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stated trust level of an estimate
///
/// Variants are declared lowest first so the derived `Ord` gives
/// `Low < MediumLow < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    /// Minimal detail or poor reference coverage
    Low,
    /// Some descriptive detail, no portions
    MediumLow,
    /// Portion descriptors without explicit units
    Medium,
    /// Explicit measurements and strong coverage
    High,
}

impl ConfidenceLevel {
    /// All tiers, lowest first
    pub const ALL: [Self; 4] = [Self::Low, Self::MediumLow, Self::Medium, Self::High];

    /// The lower of two tiers
    #[must_use]
    pub fn min_of(a: Self, b: Self) -> Self {
        a.min(b)
    }

    /// Wire name (`HIGH`, `MEDIUM`, `MEDIUM_LOW`, `LOW`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::MediumLow => "MEDIUM_LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
