//! PDF backend built on LoPDF.
//!
//! Without a password LoPDF loads only the skeleton of a protected document
//! (its trailer and `/Encrypt` dictionary), so every attempt reparses the
//! bytes with `Document::load_mem_with_password`. Parser panics are caught
//! and reported as errors.

use super::{PdfBackend, Protection, UnlockAttempt};
use crate::error::{UnlockError, UnlockResult};
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};

/// What a successful unlock hands back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The caller's bytes, unmodified
    #[default]
    Original,

    /// The decrypted document re-serialized without its `/Encrypt` dictionary
    Decrypted,
}

/// [`PdfBackend`] implementation using LoPDF.
#[derive(Debug, Clone, Default)]
pub struct LopdfBackend {
    output: OutputMode,
}

impl LopdfBackend {
    /// Creates a backend that returns original bytes on success.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets what successful unlocks return.
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    fn load(document: &[u8]) -> UnlockResult<Document> {
        guarded(|| Document::load_mem(document).map_err(UnlockError::open))
    }

    fn unlock(&self, document: &[u8], password: &str) -> UnlockResult<Vec<u8>> {
        guarded(|| {
            let mut doc = Document::load_mem_with_password(document, password)?;
            verify_first_page(&doc)?;

            match self.output {
                OutputMode::Original => Ok(document.to_vec()),
                OutputMode::Decrypted => {
                    doc.trailer.remove(b"Encrypt");
                    let mut buffer = Vec::new();
                    doc.save_to(&mut buffer).map_err(|e| UnlockError::Backend {
                        backend: "LoPDF".to_string(),
                        message: format!("Failed to save decrypted PDF: {}", e),
                    })?;
                    Ok(buffer)
                }
            }
        })
    }
}

impl PdfBackend for LopdfBackend {
    fn inspect(&self, document: &[u8]) -> UnlockResult<Protection> {
        // Owner-password-only documents are opened by `load_mem` itself.
        if Self::load(document)?.is_encrypted() {
            Ok(Protection::Encrypted)
        } else {
            Ok(Protection::Unencrypted)
        }
    }

    fn attempt_unlock(&self, document: &[u8], password: &str) -> UnlockAttempt {
        match self.unlock(document, password) {
            Ok(bytes) => UnlockAttempt::Unlocked(bytes),
            Err(e) => {
                tracing::trace!(error = %e, "unlock attempt rejected");
                UnlockAttempt::Failed
            }
        }
    }

    fn name(&self) -> &str {
        "LoPDF"
    }
}

/// Extracting the first page's text guards against decrypts that report
/// success with the wrong key.
fn verify_first_page(doc: &Document) -> UnlockResult<()> {
    let first_page = doc
        .get_pages()
        .keys()
        .next()
        .copied()
        .ok_or_else(|| UnlockError::Backend {
            backend: "LoPDF".to_string(),
            message: "Document has no pages".to_string(),
        })?;

    doc.extract_text(&[first_page])?;
    Ok(())
}

fn guarded<T>(op: impl FnOnce() -> UnlockResult<T>) -> UnlockResult<T> {
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|_| {
        Err(UnlockError::Backend {
            backend: "LoPDF".to_string(),
            message: "PDF parser panicked".to_string(),
        })
    })
}
