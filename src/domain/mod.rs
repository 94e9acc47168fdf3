//! Pure password-shaping logic.
//!
//! This module contains the computational core of password resolution:
//! recognising free-text descriptions of a password's format and deriving
//! the candidate variants implied by such a format. Nothing here touches a
//! PDF or fails.

pub mod hint;
pub mod variants;

pub use hint::extract_format_hint;
pub use variants::generate_variants;

use once_cell::sync::Lazy;
use regex::Regex;

/// How a raw candidate password should be transformed before it is tried.
///
/// The absence of a hint is represented by `Option::None` at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordFormat {
    /// Candidate is a date of birth, written DDMMYYYY with optional separators
    DateOfBirth,

    /// Only the final `n` characters of the candidate are the password
    LastDigits(usize),

    /// Only the first `n` characters of the candidate are the password
    FirstDigits(usize),
}

impl PasswordFormat {
    /// Classifies a phrase such as "last 4 digits" or "DOB in DDMMYYYY".
    ///
    /// Returns `None` when the phrase names none of the supported formats.
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        if FormatPatterns::date_of_birth().is_match(phrase) {
            return Some(Self::DateOfBirth);
        }

        if let Some(n) = FormatPatterns::count_after(FormatPatterns::last_count(), phrase) {
            return Some(Self::LastDigits(n));
        }

        FormatPatterns::count_after(FormatPatterns::first_count(), phrase).map(Self::FirstDigits)
    }
}

/// Regexes shared by hint extraction and phrase classification.
pub struct FormatPatterns;

impl FormatPatterns {
    pub fn date_of_birth() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\b(?:d\.?o\.?b\b\.?|date\s+of\s+birth|birth\s*date|dd[/\-]?mm[/\-]?yyyy|yyyy[/\-]?mm[/\-]?dd)")
                .expect("Valid regex")
        });
        &PATTERN
    }

    pub fn last_count() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)\blast\s+(\d+|[a-z]+)\b").expect("Valid regex"));
        &PATTERN
    }

    pub fn first_count() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)\bfirst\s+(\d+|[a-z]+)\b").expect("Valid regex"));
        &PATTERN
    }

    /// Reads the count captured by `pattern`, accepting digits or a number word.
    fn count_after(pattern: &Regex, phrase: &str) -> Option<usize> {
        let token = pattern.captures(phrase)?.get(1)?.as_str();
        let n = token
            .parse::<usize>()
            .ok()
            .or_else(|| number_word(token))?;
        (n > 0).then_some(n)
    }
}

fn number_word(word: &str) -> Option<usize> {
    let n = match word.to_ascii_lowercase().as_str() {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}
