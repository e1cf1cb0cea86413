//! Language utilities for ISO language code handling
//!
//! This module validates and normalizes ISO 639-1 (2-letter) and ISO 639-3
//! (3-letter) codes, and resolves the language names offered in the target
//! language picker to the codes the translation engines expect.

use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target languages offered to the user, as (display name, ISO 639-1 code)
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("Turkish", "tr"),
    ("Spanish", "es"),
    ("German", "de"),
    ("French", "fr"),
    ("Chinese", "zh"),
    ("Russian", "ru"),
    ("Japanese", "ja"),
    ("Italian", "it"),
    ("Korean", "ko"),
];

/// Source language of every capture
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Target language selected when nothing else is configured
pub const DEFAULT_TARGET_LANGUAGE: &str = "tr";

/// A source/target pair a translator is configured for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
}

impl LanguagePair {
    /// Create a pair from two codes
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// File stem used for this pair's model, e.g. `en-tr`
    pub fn model_name(&self) -> String {
        format!("{}-{}", self.source, self.target)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Validate an ISO 639-1 or ISO 639-3 code and return it lowercased
pub fn validate_language_code(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let known = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code).is_some(),
        3 => Language::from_639_3(&normalized_code).is_some(),
        _ => false,
    };

    if known {
        Ok(normalized_code)
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-3 if no ISO 639-1 code exists
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = validate_language_code(code)?;

    if normalized_code.len() == 2 {
        return Ok(normalized_code);
    }

    let lang = Language::from_639_3(&normalized_code)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(|c| c.to_string())
        .unwrap_or(normalized_code))
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part1(code1), normalize_to_part1(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let part1 = normalize_to_part1(code)?;
    let lang = if part1.len() == 2 {
        Language::from_639_1(&part1)
    } else {
        Language::from_639_3(&part1)
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Whether a code names one of the supported target languages
pub fn is_supported_target(code: &str) -> bool {
    SUPPORTED_LANGUAGES
        .iter()
        .any(|(_, supported)| language_codes_match(supported, code))
}

/// Resolve a picker entry to a supported ISO 639-1 code.
///
/// Accepts a display name ("Turkish", case-insensitive) or any code for a
/// supported language ("tr", "tur").
pub fn resolve_target_language(input: &str) -> Result<String> {
    let wanted = input.trim();

    if let Some((_, code)) = SUPPORTED_LANGUAGES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
    {
        return Ok((*code).to_string());
    }

    let code = normalize_to_part1(wanted)
        .map_err(|_| anyhow!("Unknown language: {}", input))?;

    if is_supported_target(&code) {
        Ok(code)
    } else {
        Err(anyhow!(
            "Language '{}' is not supported for translation. Supported: {}",
            input,
            supported_names().join(", ")
        ))
    }
}

/// Display names of the supported target languages, in picker order
pub fn supported_names() -> Vec<&'static str> {
    SUPPORTED_LANGUAGES.iter().map(|(name, _)| *name).collect()
}
