//! Candidate variant generation.

use super::PasswordFormat;

/// Derives the passwords implied by `password` under an optional format.
///
/// The literal password is always the first element. Without a format the
/// result is just `[password]`. With a format, the format-specific variants
/// come next, followed by the trimmed password, the password with whitespace
/// removed, and its digits only. Empty strings and duplicates are dropped,
/// keeping first occurrences.
///
/// # Examples
///
/// ```
/// use pdfunlock::domain::{generate_variants, PasswordFormat};
///
/// let variants = generate_variants("01/01/1990", Some(PasswordFormat::DateOfBirth));
/// assert_eq!(variants[0], "01/01/1990");
/// assert!(variants.contains(&"19900101".to_string()));
/// ```
pub fn generate_variants(password: &str, format: Option<PasswordFormat>) -> Vec<String> {
    let mut variants = vec![password.to_string()];

    let Some(format) = format else {
        return variants;
    };

    match format {
        PasswordFormat::DateOfBirth => variants.extend(date_permutations(password)),
        PasswordFormat::LastDigits(n) => variants.extend(last_chars(password, n)),
        PasswordFormat::FirstDigits(n) => variants.extend(first_chars(password, n)),
    }

    variants.push(password.trim().to_string());
    variants.push(password.chars().filter(|c| !c.is_whitespace()).collect());
    variants.push(password.chars().filter(|c| c.is_ascii_digit()).collect());

    dedup_preserving_order(variants)
}

/// DDMMYYYY → [DDMMYYYY, YYYYMMDD, MMDDYYYY]; nothing unless 8 digits remain.
fn date_permutations(password: &str) -> Vec<String> {
    let digits: String = password.chars().filter(|c| *c != '/' && *c != '-').collect();
    if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Vec::new();
    }

    let (day, month, year) = (&digits[0..2], &digits[2..4], &digits[4..8]);
    vec![
        digits.clone(),
        format!("{}{}{}", year, month, day),
        format!("{}{}{}", month, day, year),
    ]
}

fn last_chars(password: &str, n: usize) -> Option<String> {
    let len = password.chars().count();
    (len >= n).then(|| password.chars().skip(len - n).collect())
}

fn first_chars(password: &str, n: usize) -> Option<String> {
    (password.chars().count() >= n).then(|| password.chars().take(n).collect())
}

fn dedup_preserving_order(variants: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(variants.len());
    for (position, variant) in variants.into_iter().enumerate() {
        let is_literal = position == 0;
        if (is_literal || !variant.is_empty()) && !unique.contains(&variant) {
            unique.push(variant);
        }
    }
    unique
}
