//! Note field encryption.
//!
//! A note's title and content are encrypted independently, each into its own
//! envelope, so either can be decrypted without the other.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{NotecryptError, Result};

/// String-in/string-out field encryption.
///
/// This is the seam the note-storage layer programs against. The
/// [`EncryptionEngine`](crate::EncryptionEngine) is the production
/// implementation.
pub trait FieldCipher: Send + Sync {
    /// Encrypt one field into an envelope string.
    fn encrypt_field(&self, plaintext: &str) -> Result<String>;

    /// Decrypt one envelope string into the field's text.
    fn decrypt_field(&self, envelope: &str) -> Result<String>;
}

/// Plaintext note fields.
///
/// `Debug` prints field lengths only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
}

/// A note whose fields are envelopes, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedNote {
    pub title: String,
    pub content: String,
}

impl NoteFields {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Encrypt both fields.
    ///
    /// Both fields are checked before either is encrypted, so an invalid note
    /// never yields a half-encrypted result.
    ///
    /// # Errors
    ///
    /// - `NotecryptError::Validation` if the title or content is empty
    /// - any error from the cipher
    pub fn seal<C: FieldCipher + ?Sized>(&self, cipher: &C) -> Result<EncryptedNote> {
        if self.title.is_empty() {
            return Err(NotecryptError::Validation(
                "Note title cannot be empty".to_string(),
            ));
        }
        if self.content.is_empty() {
            return Err(NotecryptError::Validation(
                "Note content cannot be empty".to_string(),
            ));
        }

        Ok(EncryptedNote {
            title: cipher.encrypt_field(&self.title)?,
            content: cipher.encrypt_field(&self.content)?,
        })
    }
}

impl std::fmt::Debug for NoteFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteFields")
            .field("title_len", &self.title.len())
            .field("content_len", &self.content.len())
            .finish()
    }
}

impl EncryptedNote {
    /// Decrypt both fields.
    ///
    /// A title decrypted before the content fails is zeroized, not returned.
    pub fn open<C: FieldCipher + ?Sized>(&self, cipher: &C) -> Result<NoteFields> {
        let mut title = Zeroizing::new(cipher.decrypt_field(&self.title)?);
        let content = cipher.decrypt_field(&self.content)?;
        Ok(NoteFields {
            title: std::mem::take(&mut *title),
            content,
        })
    }
}
