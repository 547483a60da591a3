//! Error types for notecrypt core operations.
//!
//! The set of variants is closed on purpose: callers match on it to tell
//! startup failures (fatal) apart from per-request failures (recoverable).
//! Messages never carry plaintext or key material; the CLI layer maps these
//! to user-facing wording and exit codes.

use std::fmt;

use thiserror::Error;

/// Result type alias for notecrypt operations.
pub type Result<T> = std::result::Result<T, NotecryptError>;

/// Core error type for notecrypt operations.
#[derive(Debug, Error)]
pub enum NotecryptError {
    /// Invalid key material or key configuration at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied empty or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The cipher failed to produce ciphertext from valid input
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Malformed envelope, wrong key, or tampered ciphertext
    #[error("Decryption error: content unreadable")]
    Decryption { reason: DecryptFailure },
}

impl NotecryptError {
    /// Returns true for errors that must stop the process from serving traffic.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NotecryptError::Configuration(_))
    }

    pub(crate) fn decryption(reason: DecryptFailure) -> Self {
        NotecryptError::Decryption { reason }
    }
}

/// Why an envelope could not be opened.
///
/// Kept out of the `Display` output of [`NotecryptError::Decryption`] so that
/// user-facing messages do not become a padding or UTF-8 oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptFailure {
    /// Not base64, unknown marker, truncated header, or bad ciphertext length
    Malformed,
    /// The envelope was produced under a different scheme than the engine's
    SchemeMismatch,
    /// PKCS#7 padding did not validate (wrong key or tampering)
    Padding,
    /// Decrypted bytes were not valid UTF-8 (wrong key or tampering)
    InvalidUtf8,
    /// Decryption yielded an empty string
    Empty,
}

impl fmt::Display for DecryptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DecryptFailure::Malformed => "malformed envelope",
            DecryptFailure::SchemeMismatch => "scheme mismatch",
            DecryptFailure::Padding => "invalid padding",
            DecryptFailure::InvalidUtf8 => "invalid utf-8",
            DecryptFailure::Empty => "empty plaintext",
        };
        f.write_str(label)
    }
}
