//! Validated key material.
//!
//! `KeyMaterial` is built once from the configured secret and never changes.
//! It fixes the envelope scheme for the engine that owns it: a raw 32-byte
//! key, or a passphrase with one of the two supported derivations.

use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use super::cipher::KEY_LEN;
use super::kdf::KdfParams;
use crate::envelope::Scheme;
use crate::error::{NotecryptError, Result};

/// How a configured secret is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// The secret is the AES-256 key itself (exactly 32 bytes).
    RawKey,
    /// The secret is a passphrase run through OpenSSL `EVP_BytesToKey` (MD5).
    OpensslPassphrase,
    /// The secret is a passphrase run through Argon2id.
    Argon2Passphrase(KdfParams),
}

impl KeyMode {
    pub fn scheme(&self) -> Scheme {
        match self {
            KeyMode::RawKey => Scheme::RawKey,
            KeyMode::OpensslPassphrase => Scheme::OpensslMd5,
            KeyMode::Argon2Passphrase(_) => Scheme::Argon2id,
        }
    }
}

enum Secret {
    Raw(Zeroizing<[u8; KEY_LEN]>),
    Passphrase(SecretString),
}

/// The validated secret plus the mode it is used in.
///
/// Construction is the only place key material is checked. A value of this
/// type is always usable; invalid secrets never produce one.
pub struct KeyMaterial {
    secret: Secret,
    mode: KeyMode,
}

impl KeyMaterial {
    /// Build key material for the given mode.
    ///
    /// # Errors
    ///
    /// Returns `NotecryptError::Configuration` if:
    /// - `mode` is `RawKey` and the secret is not exactly 32 bytes
    /// - `mode` is a passphrase mode and the secret is empty or whitespace
    pub fn new(secret: &str, mode: KeyMode) -> Result<Self> {
        match mode {
            KeyMode::RawKey => Self::raw_key(secret),
            KeyMode::OpensslPassphrase | KeyMode::Argon2Passphrase(_) => {
                if secret.trim().is_empty() {
                    return Err(NotecryptError::Configuration(
                        "Passphrase cannot be empty".to_string(),
                    ));
                }
                Ok(Self {
                    secret: Secret::Passphrase(SecretString::from(secret.to_string())),
                    mode,
                })
            }
        }
    }

    /// Build raw-key material from a 32-byte secret.
    ///
    /// The secret's UTF-8 bytes are the key, so a 32-character ASCII string
    /// is a valid key.
    pub fn raw_key(secret: &str) -> Result<Self> {
        let bytes = secret.as_bytes();
        if bytes.len() != KEY_LEN {
            return Err(NotecryptError::Configuration(format!(
                "Encryption key must be exactly {} bytes (got {})",
                KEY_LEN,
                bytes.len()
            )));
        }

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(bytes);
        Ok(Self {
            secret: Secret::Raw(key),
            mode: KeyMode::RawKey,
        })
    }

    /// Build passphrase material using OpenSSL-compatible derivation.
    pub fn openssl_passphrase(passphrase: &str) -> Result<Self> {
        Self::new(passphrase, KeyMode::OpensslPassphrase)
    }

    /// Build passphrase material using Argon2id derivation.
    pub fn argon2_passphrase(passphrase: &str, params: KdfParams) -> Result<Self> {
        Self::new(passphrase, KeyMode::Argon2Passphrase(params))
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Envelope scheme this key material reads and writes.
    pub fn scheme(&self) -> Scheme {
        self.mode.scheme()
    }

    /// Raw key bytes, if in raw-key mode.
    pub(crate) fn raw_bytes(&self) -> Option<&[u8; KEY_LEN]> {
        match &self.secret {
            Secret::Raw(key) => Some(&**key),
            Secret::Passphrase(_) => None,
        }
    }

    /// Passphrase bytes, if in a passphrase mode.
    pub(crate) fn passphrase_bytes(&self) -> Option<&[u8]> {
        match &self.secret {
            Secret::Raw(_) => None,
            Secret::Passphrase(passphrase) => Some(passphrase.expose_secret().as_bytes()),
        }
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("mode", &self.mode)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
