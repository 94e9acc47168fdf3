//! Custom assertions for resolution testing.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use pdfunlock::{PasswordSource, ResolveOutcome};

/// Asserts that an outcome unlocked the document with `password`.
///
/// # Panics
/// Panics if the outcome is anything other than `Unlocked` with that password.
pub fn assert_unlocked_with(outcome: &ResolveOutcome, password: &str) {
    match outcome {
        ResolveOutcome::Unlocked { password: used, .. } => assert_eq!(
            used, password,
            "Document should be unlocked with '{}' but was unlocked with '{}'",
            password, used
        ),
        other => panic!(
            "Document should be unlocked with '{}' but outcome was {:?}",
            password,
            summarize(other)
        ),
    }
}

/// Asserts that an outcome unlocked the document from the given source.
pub fn assert_unlocked_from(outcome: &ResolveOutcome, source: PasswordSource) {
    match outcome {
        ResolveOutcome::Unlocked { source: used, .. } => assert_eq!(
            *used, source,
            "Document should be unlocked from {:?} but was unlocked from {:?}",
            source, used
        ),
        other => panic!(
            "Document should be unlocked from {:?} but outcome was {:?}",
            source,
            summarize(other)
        ),
    }
}

/// Asserts the `(None, true, message)` password-needed shape.
pub fn assert_needs_password(outcome: &ResolveOutcome, message: &str) {
    assert!(
        outcome.needs_password(),
        "Outcome should need a password but was {:?}",
        summarize(outcome)
    );
    assert!(outcome.bytes().is_none(), "Locked outcome must not carry bytes");
    assert_eq!(outcome.message(), message);
}

/// Asserts the pass-through shape for an unprotected document.
pub fn assert_passthrough(outcome: &ResolveOutcome, original: &[u8]) {
    assert!(
        matches!(outcome, ResolveOutcome::Unencrypted(_)),
        "Outcome should be Unencrypted but was {:?}",
        summarize(outcome)
    );
    assert_eq!(outcome.bytes(), Some(original), "Bytes must pass through unchanged");
    assert!(!outcome.needs_password());
    assert_eq!(outcome.message(), "");
}

/// Page count of a PDF as seen by LoPDF.
pub fn page_count(bytes: &[u8]) -> usize {
    ::lopdf::Document::load_mem(bytes)
        .unwrap_or_else(|e| panic!("Output should be a loadable PDF: {}", e))
        .get_pages()
        .len()
}

/// Page count of a protected PDF opened with `password`.
pub fn page_count_with_password(bytes: &[u8], password: &str) -> usize {
    ::lopdf::Document::load_mem_with_password(bytes, password)
        .unwrap_or_else(|e| panic!("Output should open with its password: {}", e))
        .get_pages()
        .len()
}

/// Debug view of an outcome without dumping document bytes.
fn summarize(outcome: &ResolveOutcome) -> String {
    match outcome {
        ResolveOutcome::Unencrypted(bytes) => format!("Unencrypted({} bytes)", bytes.len()),
        ResolveOutcome::Unlocked {
            bytes,
            password,
            source,
        } => format!("Unlocked({} bytes, {:?}, {:?})", bytes.len(), password, source),
        ResolveOutcome::NeedsPassword { message } => format!("NeedsPassword({})", message),
        ResolveOutcome::Failed { message } => format!("Failed({})", message),
    }
}
