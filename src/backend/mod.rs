//! PDF backends.
//!
//! A backend answers two questions about a document: is it protected, and
//! does a given password open it. Every attempt is made against a fresh parse
//! of the caller's bytes; a backend never reuses a reader that failed a
//! decrypt.

pub mod lopdf_backend;

pub use lopdf_backend::{LopdfBackend, OutputMode};

use crate::error::UnlockResult;

/// Whether a parsed document carries a user password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    Unencrypted,
    Encrypted,
}

/// Result of trying one password against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockAttempt {
    /// Password opened the document and its first page is readable
    Unlocked(Vec<u8>),

    /// Wrong password, unreadable content, or any backend failure
    Failed,
}

impl UnlockAttempt {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked(_))
    }
}

/// Two-step protocol over a PDF library.
///
/// Implementations must not panic out of either method and must treat every
/// internal error during an unlock attempt as [`UnlockAttempt::Failed`].
pub trait PdfBackend: Send + Sync {
    /// Parses `document` and reports whether it is password-protected.
    ///
    /// Returns [`UnlockError::Open`](crate::UnlockError::Open) for malformed input.
    fn inspect(&self, document: &[u8]) -> UnlockResult<Protection>;

    /// Tries `password` against a fresh parse of `document`.
    ///
    /// Success requires both that decryption succeeds and that the text of
    /// the first page can be extracted afterwards.
    fn attempt_unlock(&self, document: &[u8], password: &str) -> UnlockAttempt;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &str;
}
