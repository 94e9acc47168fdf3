//! Password resolution engine.
//!
//! [`PasswordResolver`] ties the pieces together: it asks a [`PdfBackend`]
//! whether a document is protected, tries the group's cached password, then
//! walks the caller's password pool candidate by candidate, trying each
//! candidate verbatim before its format-derived variants. The first string
//! that opens a document is remembered for its group.

pub mod outcome;

pub use outcome::{PasswordSource, ResolveOutcome, NOT_DECRYPTED, PASSWORD_REQUIRED};

use crate::backend::{LopdfBackend, PdfBackend, Protection, UnlockAttempt};
use crate::domain::{extract_format_hint, generate_variants, PasswordFormat};
use crate::error::UnlockError;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// Tunables for a [`PasswordResolver`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Pause between pool candidates once a candidate and its variants failed
    pub attempt_delay: Duration,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attempt_delay(mut self, delay: Duration) -> Self {
        self.attempt_delay = delay;
        self
    }
}

/// A password that opened a document during a pool walk.
struct Found {
    bytes: Vec<u8>,
    password: String,
    source: PasswordSource,
}

/// Resolves passwords for protected PDFs with per-group caching.
///
/// One resolver is meant to live for a processing session. Its caches are
/// plain maps mutated through `&mut self`; share it across threads behind a
/// `Mutex`.
pub struct PasswordResolver {
    backend: Box<dyn PdfBackend>,
    config: ResolverConfig,
    group_passwords: HashMap<String, String>,
    group_formats: HashMap<String, PasswordFormat>,
}

impl PasswordResolver {
    /// Creates a resolver over the given backend with empty caches.
    pub fn new(backend: Box<dyn PdfBackend>) -> Self {
        Self {
            backend,
            config: ResolverConfig::default(),
            group_passwords: HashMap::new(),
            group_formats: HashMap::new(),
        }
    }

    /// Creates a resolver using the LoPDF backend.
    pub fn with_lopdf() -> Self {
        Self::new(Box::new(LopdfBackend::new()))
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Resolves `document` for the batch identified by `group_key`.
    ///
    /// # Arguments
    /// * `document` - Raw PDF bytes
    /// * `group_key` - Batch identifier scoping password reuse
    /// * `password_pool` - Candidates, tried first to last; blank entries are skipped
    /// * `format_hint_source` - Free text describing the password's format
    ///
    /// Never returns an error: empty or malformed input becomes
    /// [`ResolveOutcome::Failed`] and a missing password becomes
    /// [`ResolveOutcome::NeedsPassword`].
    pub fn resolve(
        &mut self,
        document: &[u8],
        group_key: &str,
        password_pool: &[String],
        format_hint_source: Option<&str>,
    ) -> ResolveOutcome {
        if document.is_empty() {
            tracing::warn!(group = group_key, "refusing empty document");
            return ResolveOutcome::Failed {
                message: UnlockError::EmptyDocument.to_string(),
            };
        }

        match self.backend.inspect(document) {
            Ok(Protection::Unencrypted) => {
                return ResolveOutcome::Unencrypted(document.to_vec());
            }
            Ok(Protection::Encrypted) => {}
            Err(e) => {
                tracing::warn!(group = group_key, error = %e, "failed to open document");
                return ResolveOutcome::Failed {
                    message: open_message(e),
                };
            }
        }

        let format = self.format_for(group_key, format_hint_source);

        if let Some(cached) = self.group_passwords.get(group_key) {
            if let UnlockAttempt::Unlocked(bytes) = self.backend.attempt_unlock(document, cached) {
                tracing::info!(group = group_key, "unlocked with cached group password");
                return ResolveOutcome::Unlocked {
                    bytes,
                    password: cached.clone(),
                    source: PasswordSource::Cached,
                };
            }
            tracing::debug!(group = group_key, "cached group password rejected");
        }

        let candidates = usable_candidates(password_pool);
        if candidates.is_empty() {
            return ResolveOutcome::NeedsPassword {
                message: PASSWORD_REQUIRED,
            };
        }

        match self.walk_pool(document, &candidates, format) {
            Some(found) => {
                tracing::info!(group = group_key, source = ?found.source, "document unlocked");
                self.group_passwords
                    .insert(group_key.to_string(), found.password.clone());
                ResolveOutcome::Unlocked {
                    bytes: found.bytes,
                    password: found.password,
                    source: found.source,
                }
            }
            None => {
                tracing::warn!(
                    group = group_key,
                    candidates = candidates.len(),
                    "password pool exhausted"
                );
                ResolveOutcome::NeedsPassword {
                    message: NOT_DECRYPTED,
                }
            }
        }
    }

    /// Finds the first pool password (or variant) that opens `document`.
    ///
    /// Uses the same candidate-then-variants order as [`resolve`](Self::resolve)
    /// but neither reads nor writes the group caches. Returns `None` for
    /// empty, malformed, or unprotected documents and for an exhausted pool.
    pub fn find_first_working_password(
        &self,
        document: &[u8],
        password_pool: &[String],
        format_hint_source: Option<&str>,
    ) -> Option<String> {
        if document.is_empty() {
            return None;
        }

        match self.backend.inspect(document) {
            Ok(Protection::Encrypted) => {}
            Ok(Protection::Unencrypted) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to open document");
                return None;
            }
        }

        let candidates = usable_candidates(password_pool);
        let format = format_hint_source.and_then(extract_format_hint);
        self.walk_pool(document, &candidates, format)
            .map(|found| found.password)
    }

    /// Clears every cached group password and format hint.
    pub fn reset(&mut self) {
        tracing::debug!(
            groups = self.group_passwords.len(),
            "clearing password caches"
        );
        self.group_passwords.clear();
        self.group_formats.clear();
    }

    pub fn cached_password(&self, group_key: &str) -> Option<&str> {
        self.group_passwords.get(group_key).map(String::as_str)
    }

    /// Seeds the cache with a password already known to work for a group.
    pub fn remember_password(&mut self, group_key: &str, password: &str) {
        self.group_passwords
            .insert(group_key.to_string(), password.to_string());
    }

    pub fn cached_format(&self, group_key: &str) -> Option<PasswordFormat> {
        self.group_formats.get(group_key).copied()
    }

    /// Detects the format from `hint_source`, falling back to the group's last one.
    fn format_for(&mut self, group_key: &str, hint_source: Option<&str>) -> Option<PasswordFormat> {
        match hint_source.and_then(extract_format_hint) {
            Some(format) => {
                self.group_formats.insert(group_key.to_string(), format);
                Some(format)
            }
            None => self.cached_format(group_key),
        }
    }

    fn walk_pool(
        &self,
        document: &[u8],
        candidates: &[&str],
        format: Option<PasswordFormat>,
    ) -> Option<Found> {
        for (index, candidate) in candidates.iter().enumerate() {
            if index > 0 && !self.config.attempt_delay.is_zero() {
                thread::sleep(self.config.attempt_delay);
            }

            // The literal candidate is always the first variant.
            for (rank, variant) in generate_variants(candidate, format).into_iter().enumerate() {
                tracing::debug!(candidate = index, variant = rank, "trying password");
                if let UnlockAttempt::Unlocked(bytes) =
                    self.backend.attempt_unlock(document, &variant)
                {
                    let source = if rank == 0 {
                        PasswordSource::Candidate
                    } else {
                        PasswordSource::Variant
                    };
                    return Some(Found {
                        bytes,
                        password: variant,
                        source,
                    });
                }
            }
        }
        None
    }
}

fn usable_candidates(pool: &[String]) -> Vec<&str> {
    pool.iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

fn open_message(err: UnlockError) -> String {
    match err {
        UnlockError::Open { .. } => err.to_string(),
        other => UnlockError::open(other).to_string(),
    }
}

impl Default for PasswordResolver {
    fn default() -> Self {
        Self::with_lopdf()
    }
}
