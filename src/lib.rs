//! Password resolution for protected PDF attachments.
//!
//! Bank and card statements arrive as PDFs protected by a password the
//! recipient is expected to derive: a date of birth, the last digits of an
//! account number. This library determines which candidate password (or a
//! variant derived from it) opens such a document, and remembers the answer
//! per group so the rest of a batch opens on the first try.
//!
//! # Architecture
//!
//! - [`domain`]: Format-hint detection and password variant generation
//! - [`backend`]: PDF inspection and unlock attempts (LoPDF)
//! - [`resolver`]: The resolution engine with its group caches
//! - [`batch`]: Group processing over many documents
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use pdfunlock::PasswordResolver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut resolver = PasswordResolver::with_lopdf();
//! let bytes = std::fs::read("statement.pdf")?;
//! let pool = vec!["01/01/1990".to_string()];
//!
//! let outcome = resolver.resolve(
//!     &bytes,
//!     "alerts@bank.example",
//!     &pool,
//!     Some("The password is your date of birth in DDMMYYYY format."),
//! );
//! if outcome.needs_password() {
//!     eprintln!("{}", outcome.message());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Format Hints
//!
//! ```
//! use pdfunlock::domain::{extract_format_hint, PasswordFormat};
//!
//! let format = extract_format_hint("Use the last 4 digits of your card");
//! assert_eq!(format, Some(PasswordFormat::LastDigits(4)));
//! ```

// Public API
pub mod backend;
pub mod batch;
pub mod domain;
pub mod error;
pub mod resolver;

// Re-exports for convenient access
pub use backend::{LopdfBackend, OutputMode, PdfBackend, Protection, UnlockAttempt};
pub use batch::{process_group, BatchItem, BatchSummary, CompletedItem, PendingItem};
pub use domain::{extract_format_hint, generate_variants, PasswordFormat};
pub use error::{UnlockError, UnlockResult};
pub use resolver::{
    PasswordResolver, PasswordSource, ResolveOutcome, ResolverConfig, NOT_DECRYPTED,
    PASSWORD_REQUIRED,
};
