//! Resolution outcomes and supporting types.

/// Message for a protected document with no password to try.
pub const PASSWORD_REQUIRED: &str = "password required";

/// Message for a protected document whose password pool was exhausted.
pub const NOT_DECRYPTED: &str = "document has not been decrypted";

/// Where the password that unlocked a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    /// The group's cached password
    Cached,

    /// A pool candidate, tried verbatim
    Candidate,

    /// A variant derived from a pool candidate
    Variant,
}

/// Outcome of resolving one document.
///
/// Terminal states of the per-document state machine: `Failed` (error),
/// `Unencrypted`, `Unlocked`, and `NeedsPassword` (locked).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Document was not protected; bytes pass through unchanged
    Unencrypted(Vec<u8>),

    /// A password opened the document
    Unlocked {
        bytes: Vec<u8>,
        password: String,
        source: PasswordSource,
    },

    /// No usable password; the caller must supply one or skip the document
    NeedsPassword { message: &'static str },

    /// Empty or malformed input
    Failed { message: String },
}

impl ResolveOutcome {
    /// Readable bytes for a successful outcome.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Unencrypted(bytes) | Self::Unlocked { bytes, .. } => Some(bytes),
            Self::NeedsPassword { .. } | Self::Failed { .. } => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Unencrypted(bytes) | Self::Unlocked { bytes, .. } => Some(bytes),
            Self::NeedsPassword { .. } | Self::Failed { .. } => None,
        }
    }

    pub fn needs_password(&self) -> bool {
        matches!(self, Self::NeedsPassword { .. })
    }

    pub fn is_success(&self) -> bool {
        self.bytes().is_some()
    }

    /// Error or password-needed message; empty on success.
    pub fn message(&self) -> &str {
        match self {
            Self::NeedsPassword { message } => message,
            Self::Failed { message } => message,
            Self::Unencrypted(_) | Self::Unlocked { .. } => "",
        }
    }

    /// The password that unlocked the document, if one was needed.
    pub fn password(&self) -> Option<&str> {
        match self {
            Self::Unlocked { password, .. } => Some(password),
            _ => None,
        }
    }

    /// Flattens into `(bytes, needs_password, message)`.
    pub fn into_parts(self) -> (Option<Vec<u8>>, bool, String) {
        let needs_password = self.needs_password();
        let message = self.message().to_string();
        (self.into_bytes(), needs_password, message)
    }
}
