// ABOUTME: Immutable food composition reference with exact and restricted fuzzy lookup
// ABOUTME: Loaded once from a versioned JSON snapshot and shared read-only across requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Food Composition Reference
//!
//! A closed table of common foods with nutrient values per 100 g, sourced
//! from a trusted reference standard. The table is validated in full when it
//! is loaded; a single malformed entry rejects the whole snapshot.
//!
//! Lookup is a pure function over the loaded data:
//!
//! 1. case-insensitive exact match on the canonical name
//! 2. restricted fuzzy match: singular/plural rewriting, then the synonym table
//! 3. otherwise no match
//!
//! There is no substring or edit-distance matching, so a food either resolves
//! to a specific entry for a stated reason or it does not resolve at all.
//!
//! # Example
//!
//! ```rust,no_run
//! use meal_estimator::reference::{FoodCompositionReference, MatchKind};
//!
//! # fn example() -> Result<(), meal_estimator::reference::ReferenceLoadError> {
//! let reference = FoodCompositionReference::bundled()?;
//! let found = reference.lookup("Broccoli").map(|m| m.kind);
//! assert_eq!(found, Some(MatchKind::Exact));
//! # Ok(())
//! # }
//! ```

mod error;
/// Ingredient name normalization helpers
pub mod normalize;

pub use error::ReferenceLoadError;

use meal_estimator_core::models::NutrientProfile;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::logging::AnalysisLogger;
use normalize::{
    canonical_key, normalize_ingredient_name, pluralize_phrase, singularize_phrase,
};

/// Bundled reference snapshot, compiled into the binary
const BUNDLED_REFERENCE_JSON: &str = include_str!("../../data/food_composition.json");

/// Provenance tag every entry of this table must carry
pub const REFERENCE_SOURCE_TAG: &str = "reference";

/// One row of the reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    /// Normalized lowercase identifier (unique key)
    pub canonical_name: String,
    /// Nutrient values per 100 g
    pub nutrients_per_100g: NutrientProfile,
    /// Provenance marker, always `"reference"`
    pub source_tag: String,
}

/// How a lookup found its entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Name equals a canonical name, ignoring case and spacing
    Exact,
    /// Name reached a canonical name through a fuzzy rule
    Fuzzy(FuzzyRule),
}

/// Fuzzy rule that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyRule {
    /// Singular/plural rewriting
    Plural,
    /// Synonym table
    Synonym,
}

/// Successful lookup
#[derive(Debug, Clone, Copy)]
pub struct ReferenceMatch<'a> {
    /// Matched reference row
    pub entry: &'a CompositionEntry,
    /// How the row was found
    pub kind: MatchKind,
}

/// On-disk snapshot format
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReferenceFile {
    version: String,
    #[serde(default)]
    standard: String,
    foods: BTreeMap<String, ReferenceFileEntry>,
    #[serde(default)]
    synonyms: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReferenceFileEntry {
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    sodium_mg: f64,
    sugar_g: f64,
    fiber_g: f64,
    source: String,
}

impl ReferenceFileEntry {
    const fn profile(&self) -> NutrientProfile {
        NutrientProfile {
            calories: self.calories,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            sodium_mg: self.sodium_mg,
            sugar_g: self.sugar_g,
            fiber_g: self.fiber_g,
        }
    }
}

/// Read-only food composition table
///
/// Construct once per process and share behind an `Arc`; nothing mutates
/// it after load, so concurrent requests need no locking.
#[derive(Debug, Clone)]
pub struct FoodCompositionReference {
    version: String,
    standard: String,
    entries: HashMap<String, CompositionEntry>,
    synonyms: HashMap<String, String>,
}

impl FoodCompositionReference {
    /// Load the snapshot bundled with the crate
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled snapshot fails validation
    pub fn bundled() -> Result<Self, ReferenceLoadError> {
        Self::from_json_str(BUNDLED_REFERENCE_JSON)
    }

    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceLoadError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ReferenceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Parse and validate a snapshot from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, missing fields, negative or
    /// non-finite nutrients, a source other than `"reference"`, duplicate or
    /// blank names, dangling synonyms, synonyms whose alias normalization
    /// would rewrite, or an empty table.
    pub fn from_json_str(json: &str) -> Result<Self, ReferenceLoadError> {
        let file: ReferenceFile = serde_json::from_str(json)?;
        let reference = Self::from_file(file)?;
        AnalysisLogger::log_reference_loaded(&reference.version, reference.len());
        Ok(reference)
    }

    fn from_file(file: ReferenceFile) -> Result<Self, ReferenceLoadError> {
        if file.foods.is_empty() {
            return Err(ReferenceLoadError::Empty);
        }

        let mut entries = HashMap::with_capacity(file.foods.len());
        for (raw_name, raw_entry) in file.foods {
            let canonical_name = canonical_key(&raw_name);
            if canonical_name.is_empty() {
                return Err(ReferenceLoadError::BlankName);
            }

            let profile = raw_entry.profile();
            if let Some((field, value)) = profile.first_invalid_field() {
                return Err(if value.is_finite() {
                    ReferenceLoadError::NegativeNutrient {
                        name: canonical_name,
                        field,
                        value,
                    }
                } else {
                    ReferenceLoadError::NonFiniteNutrient {
                        name: canonical_name,
                        field,
                    }
                });
            }

            if raw_entry.source != REFERENCE_SOURCE_TAG {
                return Err(ReferenceLoadError::UnexpectedSource {
                    name: canonical_name,
                    source_tag: raw_entry.source,
                });
            }

            if entries.contains_key(&canonical_name) {
                return Err(ReferenceLoadError::DuplicateName(canonical_name));
            }
            entries.insert(
                canonical_name.clone(),
                CompositionEntry {
                    canonical_name,
                    nutrients_per_100g: profile,
                    source_tag: raw_entry.source,
                },
            );
        }

        let mut synonyms = HashMap::with_capacity(file.synonyms.len());
        for (alias, target) in file.synonyms {
            let alias = canonical_key(&alias);
            let target = canonical_key(&target);
            let normalized = normalize_ingredient_name(&alias);
            if normalized != alias {
                return Err(ReferenceLoadError::UnreachableSynonym { alias, normalized });
            }
            if !entries.contains_key(&target) {
                return Err(ReferenceLoadError::DanglingSynonym { alias, target });
            }
            synonyms.insert(alias, target);
        }

        Ok(Self {
            version: file.version,
            standard: file.standard,
            entries,
            synonyms,
        })
    }

    /// Snapshot version string
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Reference standard the values come from
    #[must_use]
    pub fn standard(&self) -> &str {
        &self.standard
    }

    /// Number of foods in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no foods (never the case after a successful load)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by canonical name, without fuzzy matching
    #[must_use]
    pub fn get(&self, canonical_name: &str) -> Option<&CompositionEntry> {
        self.entries.get(canonical_name)
    }

    /// All canonical names, sorted
    #[must_use]
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a food name against the table
    ///
    /// Exact match first, then singular/plural rewriting, then the synonym
    /// table. Returns `None` when no rule applies.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ReferenceMatch<'_>> {
        let key = canonical_key(name);
        if key.is_empty() {
            return None;
        }

        if let Some(entry) = self.entries.get(&key) {
            return Some(ReferenceMatch {
                entry,
                kind: MatchKind::Exact,
            });
        }

        let singular = singularize_phrase(&key);
        let plural = pluralize_phrase(&key);
        let plural_hit = [&singular, &plural]
            .into_iter()
            .filter(|candidate| **candidate != key)
            .find_map(|candidate| self.entries.get(candidate));
        if let Some(entry) = plural_hit {
            return Some(ReferenceMatch {
                entry,
                kind: MatchKind::Fuzzy(FuzzyRule::Plural),
            });
        }

        self.synonyms
            .get(&key)
            .or_else(|| self.synonyms.get(&singular))
            .and_then(|target| self.entries.get(target))
            .map(|entry| ReferenceMatch {
                entry,
                kind: MatchKind::Fuzzy(FuzzyRule::Synonym),
            })
    }
}
