//! Password format hint detection.
//!
//! Statements and notification emails usually describe the password rather
//! than state it: "your date of birth in DDMMYYYY format", "last 4 digits of
//! your card". This module scans such text and reduces it to a
//! [`PasswordFormat`].

use super::PasswordFormat;
use once_cell::sync::Lazy;
use regex::Regex;

/// Extracts the password format described in free text.
///
/// Patterns are applied in a fixed priority order:
/// 1. date of birth / DOB with a format description
/// 2. "last N digits"
/// 3. "first N digits"
/// 4. "password format X"
/// 5. "in X format"
/// 6. "format X for/as password"
///
/// The phrase captured by the first matching pattern is classified with
/// [`PasswordFormat::from_phrase`]. A phrase naming no supported format does
/// not end the search; the next pattern is tried.
pub fn extract_format_hint(text: &str) -> Option<PasswordFormat> {
    if text.trim().is_empty() {
        return None;
    }

    HintPatterns::in_priority_order()
        .iter()
        .filter_map(|pattern| pattern.captures(text))
        .filter_map(|caps| caps.get(1))
        .find_map(|phrase| PasswordFormat::from_phrase(phrase.as_str()))
}

struct HintPatterns;

impl HintPatterns {
    fn in_priority_order() -> &'static [Regex] {
        static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
            [
                r"(?i)\b((?:d\.?o\.?b\b\.?|date\s+of\s+birth|birth\s*date)[^\n.;]*)",
                r"(?i)\b(last\s+(?:\d+|[a-z]+)\s+(?:digits?|characters?|chars?|numbers?|letters?))",
                r"(?i)\b(first\s+(?:\d+|[a-z]+)\s+(?:digits?|characters?|chars?|numbers?|letters?))",
                r"(?i)\bpassword\s+format\s*(?:is|:|-)?\s*([^\n.;]+)",
                r"(?i)\bin\s+([^\n.;]+?)\s+format\b",
                r"(?i)\bformat\s+([^\n.;]+?)\s+(?:for|as)\s+(?:the\s+|your\s+)?password\b",
            ]
            .iter()
            .map(|p| Regex::new(p).expect("Valid hint regex"))
            .collect()
        });
        &PATTERNS
    }
}
