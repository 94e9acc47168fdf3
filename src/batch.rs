//! Group batch processing.
//!
//! Documents usually arrive in groups that share a password: all statements
//! matching one search keyword, or all attachments from one sender. A group
//! is processed by resolving its password once from a representative
//! document and then resolving every member against the warmed cache.

use crate::resolver::{PasswordResolver, ResolveOutcome};
use std::collections::HashSet;

/// One document handed over by the mailbox collaborator.
#[derive(Debug, Clone, Default)]
pub struct BatchItem {
    /// Stable identifier, e.g. `<message id>_<attachment id>`
    pub id: String,

    /// Display name, usually the attachment file name
    pub name: String,

    pub bytes: Vec<u8>,

    /// Text searched for a password format hint (an email body)
    pub body_text: Option<String>,

    /// Human-readable hint surfaced to the user when a password is needed
    pub password_hint: Option<String>,
}

impl BatchItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bytes,
            ..Default::default()
        }
    }

    pub fn with_body_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = Some(text.into());
        self
    }

    pub fn with_password_hint(mut self, hint: impl Into<String>) -> Self {
        self.password_hint = Some(hint.into());
        self
    }
}

/// A successfully resolved document, ready for upload.
#[derive(Debug, Clone)]
pub struct CompletedItem {
    pub id: String,
    pub name: String,
    pub bytes: Vec<u8>,
    pub was_encrypted: bool,
}

/// A document that could not be delivered, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingItem {
    pub id: String,
    pub name: String,
    pub message: String,
    pub password_hint: Option<String>,
}

/// Statistics and per-item results of a group run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub completed: Vec<CompletedItem>,

    /// Items that need a password from the user
    pub password_required: Vec<PendingItem>,

    /// Items that are empty or not valid PDFs
    pub errors: Vec<PendingItem>,

    /// Items skipped because their id was already processed
    pub skipped: usize,

    /// Password found by pre-resolution, if it ran and succeeded
    pub group_password: Option<String>,
}

impl BatchSummary {
    pub fn success_count(&self) -> usize {
        self.completed.len()
    }

    /// Returns true if every non-skipped item was delivered.
    pub fn is_complete(&self) -> bool {
        self.password_required.is_empty() && self.errors.is_empty()
    }
}

/// Resolves every item of a group.
///
/// When the pool is non-empty and the group has no cached password yet, the
/// first unprocessed item is used to find the group password up front and the
/// result is seeded into the resolver. Ids of delivered items are added to
/// `processed_ids`; items already present there are skipped. A failing item
/// never stops the batch.
pub fn process_group(
    resolver: &mut PasswordResolver,
    group_key: &str,
    items: &[BatchItem],
    password_pool: &[String],
    processed_ids: &mut HashSet<String>,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    tracing::info!(group = group_key, items = items.len(), "starting group batch");

    if !password_pool.is_empty() && resolver.cached_password(group_key).is_none() {
        if let Some(first) = items.iter().find(|item| !processed_ids.contains(&item.id)) {
            summary.group_password = resolver.find_first_working_password(
                &first.bytes,
                password_pool,
                first.body_text.as_deref(),
            );
            if let Some(password) = &summary.group_password {
                resolver.remember_password(group_key, password);
            }
        }
    }

    for item in items {
        if processed_ids.contains(&item.id) {
            tracing::debug!(group = group_key, item = %item.name, "skipping processed item");
            summary.skipped += 1;
            continue;
        }

        let outcome = resolver.resolve(
            &item.bytes,
            group_key,
            password_pool,
            item.body_text.as_deref(),
        );

        match outcome {
            ResolveOutcome::Unencrypted(bytes) => {
                summary.completed.push(completed(item, bytes, false));
                processed_ids.insert(item.id.clone());
            }
            ResolveOutcome::Unlocked { bytes, .. } => {
                summary.completed.push(completed(item, bytes, true));
                processed_ids.insert(item.id.clone());
            }
            ResolveOutcome::NeedsPassword { message } => {
                tracing::info!(group = group_key, item = %item.name, reason = message, "password required");
                summary.password_required.push(pending(item, message));
            }
            ResolveOutcome::Failed { message } => {
                tracing::error!(group = group_key, item = %item.name, reason = %message, "failed to process item");
                summary.errors.push(pending(item, &message));
            }
        }
    }

    tracing::info!(
        group = group_key,
        success = summary.success_count(),
        password_required = summary.password_required.len(),
        errors = summary.errors.len(),
        "group batch completed"
    );
    summary
}

fn completed(item: &BatchItem, bytes: Vec<u8>, was_encrypted: bool) -> CompletedItem {
    CompletedItem {
        id: item.id.clone(),
        name: item.name.clone(),
        bytes,
        was_encrypted,
    }
}

fn pending(item: &BatchItem, message: &str) -> PendingItem {
    PendingItem {
        id: item.id.clone(),
        name: item.name.clone(),
        message: message.to_string(),
        password_hint: item.password_hint.clone(),
    }
}
