// ABOUTME: Fail-fast error kinds for loading the food composition reference
// ABOUTME: Any malformed entry aborts the load instead of degrading results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a reference snapshot is rejected at startup
#[derive(Debug, Error)]
pub enum ReferenceLoadError {
    /// Reference file could not be read
    #[error("Failed to read reference file {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reference JSON is malformed or missing a required field
    #[error("Malformed reference data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A nutrient value is negative
    #[error("Entry '{name}' has negative {field}: {value}")]
    NegativeNutrient {
        /// Canonical food name
        name: String,
        /// Offending nutrient field
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A nutrient value is NaN or infinite
    #[error("Entry '{name}' has non-finite {field}")]
    NonFiniteNutrient {
        /// Canonical food name
        name: String,
        /// Offending nutrient field
        field: &'static str,
    },

    /// Entry provenance is not the trusted reference standard
    #[error("Entry '{name}' has source '{source_tag}', expected 'reference'")]
    UnexpectedSource {
        /// Canonical food name
        name: String,
        /// Source tag found in the file
        source_tag: String,
    },

    /// Two keys normalize to the same canonical name
    #[error("Duplicate canonical name '{0}'")]
    DuplicateName(String),

    /// Food name is blank after normalization
    #[error("Entry with blank canonical name")]
    BlankName,

    /// Synonym points to a food that is not in the table
    #[error("Synonym '{alias}' points to unknown food '{target}'")]
    DanglingSynonym {
        /// Alias text
        alias: String,
        /// Missing canonical name
        target: String,
    },

    /// Synonym alias contains a word that name normalization strips
    #[error("Synonym '{alias}' can never match; normalized names read '{normalized}'")]
    UnreachableSynonym {
        /// Alias text
        alias: String,
        /// Alias after normalization
        normalized: String,
    },

    /// The reference contains no foods
    #[error("Reference contains no foods")]
    Empty,
}
