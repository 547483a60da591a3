//! # Notecrypt Core
//!
//! At-rest encryption for note fields: turns plaintext strings into
//! self-describing ciphertext envelopes and back.
//!
//! This crate holds the whole encryption service and nothing else. Storage,
//! transport and presentation live in the callers; they pass strings in and
//! get strings (or a typed error) out.
//!
//! ## Architecture
//!
//! - **crypto**: key material, key derivation and the AES-256-CBC cipher
//! - **envelope**: the persisted envelope format (marker + IV/salt + ciphertext)
//! - **engine**: `EncryptionEngine`, the `encrypt`/`decrypt` entry points
//! - **note**: title/content wrapper over any `FieldCipher`
//!
//! ## Example
//!
//! ```
//! use notecrypt_core::{EncryptionEngine, KeyMaterial, NoteFields};
//!
//! let key = KeyMaterial::raw_key("01234567890123456789012345678901").unwrap();
//! let engine = EncryptionEngine::new(key);
//!
//! let sealed = NoteFields::new("Groceries", "eggs, milk").seal(&engine).unwrap();
//! let opened = sealed.open(&engine).unwrap();
//! assert_eq!(opened.content, "eggs, milk");
//! ```

pub mod crypto;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod note;

pub use crypto::{KdfParams, KeyMaterial, KeyMode};
pub use engine::EncryptionEngine;
pub use envelope::{Envelope, EnvelopeHeader, Scheme};
pub use error::{DecryptFailure, NotecryptError, Result};
pub use note::{EncryptedNote, FieldCipher, NoteFields};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
