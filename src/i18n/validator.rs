//! Translation file validation.
//!
//! Compares a language file against the fallback language file so that a
//! missing key or a dropped `{placeholder}` is caught before it reaches the
//! site, where it would silently render as a raw key.

use crate::i18n::TranslationMap;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the page show raw keys or broken templates
    pub errors: Vec<String>,

    /// Suspicious but harmless findings
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation files.
pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate `candidate` against `reference` (normally the fallback language).
    ///
    /// - keys missing from the candidate are errors
    /// - placeholders that differ between the two values are errors
    /// - keys only in the candidate and empty values are warnings
    pub fn validate(reference: &TranslationMap, candidate: &TranslationMap) -> ValidationReport {
        let mut report = ValidationReport::new();

        let reference_keys: BTreeSet<String> = reference.leaf_keys().into_iter().collect();
        let candidate_keys: BTreeSet<String> = candidate.leaf_keys().into_iter().collect();

        for key in reference_keys.difference(&candidate_keys) {
            report.errors.push(format!("Missing key: {}", key));
        }

        for key in candidate_keys.difference(&reference_keys) {
            report.warnings.push(format!("Key not present in reference: {}", key));
        }

        for key in reference_keys.intersection(&candidate_keys) {
            let (Ok(original), Ok(translated)) = (reference.lookup(key), candidate.lookup(key))
            else {
                continue;
            };

            if translated.trim().is_empty() {
                report.warnings.push(format!("Empty value: {}", key));
            }

            let orig_placeholders = Self::extract_placeholders(original);
            let trans_placeholders = Self::extract_placeholders(translated);
            if orig_placeholders != trans_placeholders {
                report.errors.push(format!(
                    "Placeholder mismatch in {}: reference has {:?}, translation has {:?}",
                    key, orig_placeholders, trans_placeholders
                ));
            }
        }

        report
    }

    /// Extract the distinct `{name}` placeholders of a template
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
