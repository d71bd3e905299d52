// ABOUTME: Re-validation of untrusted per-ingredient quantities from the extraction service
// ABOUTME: Implausible values fall back to a default portion; missing values contribute no mass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::quantity_limits::{MAX_QUANTITY_G, MIN_QUANTITY_G};

/// Where an ingredient's gram quantity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantitySource {
    /// Plausible value reported by the service
    Reported,
    /// Implausible value replaced with the category's typical portion
    Defaulted,
    /// No quantity (absent or zero); contributes no mass
    Unspecified,
}

/// Quantity after re-validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SanitizedQuantity {
    /// Grams used for scaling and coverage
    pub grams: f64,
    /// Provenance of `grams`
    pub source: QuantitySource,
}

/// Re-validate a service-reported quantity
///
/// - `None` or zero: 0 g, [`QuantitySource::Unspecified`]
/// - non-finite, negative, or above 5000 g: `default_portion_g`, [`QuantitySource::Defaulted`]
/// - otherwise the value itself, [`QuantitySource::Reported`]
#[must_use]
pub fn sanitize_quantity(raw: Option<f64>, default_portion_g: f64) -> SanitizedQuantity {
    match raw {
        None => SanitizedQuantity {
            grams: 0.0,
            source: QuantitySource::Unspecified,
        },
        Some(value) if !value.is_finite() || !(MIN_QUANTITY_G..=MAX_QUANTITY_G).contains(&value) => {
            SanitizedQuantity {
                grams: default_portion_g,
                source: QuantitySource::Defaulted,
            }
        }
        Some(value) if value == 0.0 => SanitizedQuantity {
            grams: 0.0,
            source: QuantitySource::Unspecified,
        },
        Some(value) => SanitizedQuantity {
            grams: value,
            source: QuantitySource::Reported,
        },
    }
}
