// ABOUTME: Ingredient name normalization and singular/plural rewriting
// ABOUTME: Strips preparation qualifiers so "grilled chicken breast" keys as "chicken breast"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Preparation, freshness and size words that never change which food is meant
const QUALIFIERS: &[&str] = &[
    "grilled",
    "fresh",
    "steamed",
    "baked",
    "roasted",
    "boiled",
    "fried",
    "pan-fried",
    "stir-fried",
    "deep-fried",
    "sauteed",
    "sautéed",
    "poached",
    "braised",
    "broiled",
    "raw",
    "cooked",
    "chopped",
    "sliced",
    "diced",
    "cubed",
    "shredded",
    "grated",
    "mashed",
    "toasted",
    "smoked",
    "seasoned",
    "salted",
    "unsalted",
    "organic",
    "plain",
    "homemade",
    "leftover",
    "frozen",
    "ripe",
    "crispy",
    "warm",
    "skinless",
    "boneless",
    "large",
    "small",
    "medium",
];

/// Plural endings that swap back to `f`; every other `-ves` word only drops the `s`
const VES_PLURALS: &[(&str, &str)] = &[
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("halves", "half"),
    ("calves", "calf"),
];

/// Filler words that carry no identity
const NOISE_WORDS: &[&str] = &[
    "some", "a", "an", "the", "of", "bit", "little", "piece", "pieces", "slice", "slices",
    "serving", "servings", "portion", "portions",
];

/// Lowercase, trim and collapse internal whitespace
#[must_use]
pub fn canonical_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a raw ingredient name for reference lookup
///
/// Lowercases, replaces punctuation with spaces (hyphens and apostrophes
/// inside words survive), and drops qualifier and filler words. When
/// stripping would leave nothing, the lowercase original is returned.
#[must_use]
pub fn normalize_ingredient_name(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '\'' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let kept: Vec<&str> = cleaned
        .split_whitespace()
        .map(|word| word.trim_matches(|c| c == '-' || c == '\''))
        .filter(|word| !word.is_empty())
        .filter(|word| !QUALIFIERS.contains(word) && !NOISE_WORDS.contains(word))
        .collect();

    if kept.is_empty() {
        canonical_key(raw)
    } else {
        kept.join(" ")
    }
}

/// Singular form of one English word, covering the plurals common in food names
#[must_use]
pub fn singularize_word(word: &str) -> String {
    let len = word.chars().count();
    if len <= 3 || word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_owned();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(singular) = VES_PLURALS.iter().find_map(|(plural, singular)| {
        word.strip_suffix(plural)
            .map(|stem| format!("{stem}{singular}"))
    }) {
        return singular;
    }
    if let Some(stem) = word.strip_suffix("oes") {
        return format!("{stem}o");
    }
    for suffix in ["ches", "shes", "xes", "sses"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_owned();
        }
    }
    word.strip_suffix('s').unwrap_or(word).to_owned()
}

/// Plural form of one English word
#[must_use]
pub fn pluralize_word(word: &str) -> String {
    let consonant_y = word.len() > 1
        && word.ends_with('y')
        && !matches!(
            word.as_bytes().get(word.len() - 2).copied(),
            Some(b'a' | b'e' | b'i' | b'o' | b'u')
        );
    if consonant_y {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["s", "x", "ch", "sh", "o"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Singularize every word of a phrase
#[must_use]
pub fn singularize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(singularize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pluralize the last word of a phrase
#[must_use]
pub fn pluralize_phrase(phrase: &str) -> String {
    match phrase.rsplit_once(' ') {
        Some((head, last)) => format!("{head} {}", pluralize_word(last)),
        None => pluralize_word(phrase),
    }
}
