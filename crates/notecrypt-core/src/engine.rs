//! The encryption engine.
//!
//! `EncryptionEngine` owns one [`KeyMaterial`] and turns note fields into
//! envelopes and back. It holds no other state, performs no I/O and is
//! `Send + Sync`, so a single instance can be shared across request handlers
//! (e.g. behind an `Arc`) without locking.

use zeroize::Zeroize;

use crate::crypto::{
    decrypt_cbc, derive_argon2id, encrypt_cbc, evp_bytes_to_key, fill_random, KeyMaterial,
    KeyMode, IV_LEN,
};
use crate::envelope::{Envelope, EnvelopeHeader, Scheme, ARGON2_SALT_LEN, OPENSSL_SALT_LEN};
use crate::error::{DecryptFailure, NotecryptError, Result};
use crate::note::FieldCipher;

/// Encrypts and decrypts note fields under a single key.
#[derive(Debug)]
pub struct EncryptionEngine {
    key: KeyMaterial,
}

impl EncryptionEngine {
    pub fn new(key: KeyMaterial) -> Self {
        Self { key }
    }

    /// Scheme used for every envelope this engine writes or accepts.
    pub fn scheme(&self) -> Scheme {
        self.key.scheme()
    }

    /// Encrypt `plaintext` into an envelope string.
    ///
    /// Every call uses fresh randomness, so encrypting the same text twice
    /// yields two different envelopes.
    ///
    /// # Errors
    ///
    /// - `NotecryptError::Validation` if `plaintext` is empty
    /// - `NotecryptError::Encryption` if randomness, derivation, or the cipher fails
    ///
    /// # Examples
    ///
    /// ```
    /// use notecrypt_core::{EncryptionEngine, KeyMaterial};
    ///
    /// let key = KeyMaterial::raw_key("01234567890123456789012345678901").unwrap();
    /// let engine = EncryptionEngine::new(key);
    ///
    /// let envelope = engine.encrypt("hello world").unwrap();
    /// assert_eq!(engine.decrypt(&envelope).unwrap(), "hello world");
    /// ```
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        Ok(self.seal(plaintext)?.encode())
    }

    /// Decrypt an envelope string back into the original text.
    ///
    /// # Errors
    ///
    /// - `NotecryptError::Validation` if `envelope` is empty
    /// - `NotecryptError::Decryption` if the envelope is malformed, was written
    ///   under another scheme, or does not decrypt to non-empty UTF-8 under
    ///   this key
    pub fn decrypt(&self, envelope: &str) -> Result<String> {
        let parsed = Envelope::decode(envelope).inspect_err(|e| self.log_rejection(e))?;
        self.open(&parsed)
    }

    /// Encrypt `plaintext` into a structured [`Envelope`].
    pub fn seal(&self, plaintext: &str) -> Result<Envelope> {
        if plaintext.is_empty() {
            return Err(NotecryptError::Validation(
                "Plaintext must be a non-empty string".to_string(),
            ));
        }

        let envelope = match self.key.mode() {
            KeyMode::RawKey => {
                let key = self.raw_key()?;
                let mut iv = [0u8; IV_LEN];
                fill_random(&mut iv)?;
                Envelope {
                    ciphertext: encrypt_cbc(key, &iv, plaintext.as_bytes())?,
                    header: EnvelopeHeader::RawKey { iv },
                }
            }
            KeyMode::OpensslPassphrase => {
                let mut salt = [0u8; OPENSSL_SALT_LEN];
                fill_random(&mut salt)?;
                let derived = evp_bytes_to_key(self.passphrase()?, &salt);
                Envelope {
                    ciphertext: encrypt_cbc(derived.key(), derived.iv(), plaintext.as_bytes())?,
                    header: EnvelopeHeader::OpensslMd5 { salt },
                }
            }
            KeyMode::Argon2Passphrase(params) => {
                let mut salt = [0u8; ARGON2_SALT_LEN];
                fill_random(&mut salt)?;
                let derived = derive_argon2id(self.passphrase()?, &salt, &params)?;
                Envelope {
                    ciphertext: encrypt_cbc(derived.key(), derived.iv(), plaintext.as_bytes())?,
                    header: EnvelopeHeader::Argon2id { salt },
                }
            }
        };

        tracing::debug!(
            scheme = %envelope.scheme(),
            ciphertext_len = envelope.ciphertext.len(),
            "sealed field"
        );
        Ok(envelope)
    }

    /// Decrypt a structured [`Envelope`].
    pub fn open(&self, envelope: &Envelope) -> Result<String> {
        self.open_inner(envelope)
            .inspect_err(|e| self.log_rejection(e))
    }

    fn open_inner(&self, envelope: &Envelope) -> Result<String> {
        if envelope.scheme() != self.scheme() {
            return Err(NotecryptError::decryption(DecryptFailure::SchemeMismatch));
        }

        let plaintext = match (&envelope.header, self.key.mode()) {
            (EnvelopeHeader::RawKey { iv }, KeyMode::RawKey) => {
                decrypt_cbc(self.raw_key()?, iv, &envelope.ciphertext)?
            }
            (EnvelopeHeader::OpensslMd5 { salt }, KeyMode::OpensslPassphrase) => {
                let derived = evp_bytes_to_key(self.passphrase()?, salt);
                decrypt_cbc(derived.key(), derived.iv(), &envelope.ciphertext)?
            }
            (EnvelopeHeader::Argon2id { salt }, KeyMode::Argon2Passphrase(params)) => {
                let derived = derive_argon2id(self.passphrase()?, salt, &params)?;
                decrypt_cbc(derived.key(), derived.iv(), &envelope.ciphertext)?
            }
            _ => return Err(NotecryptError::decryption(DecryptFailure::SchemeMismatch)),
        };

        into_text(plaintext)
    }

    fn raw_key(&self) -> Result<&[u8; crate::crypto::KEY_LEN]> {
        self.key
            .raw_bytes()
            .ok_or_else(|| NotecryptError::Encryption("Raw key material unavailable".to_string()))
    }

    fn passphrase(&self) -> Result<&[u8]> {
        self.key
            .passphrase_bytes()
            .ok_or_else(|| NotecryptError::Encryption("Passphrase unavailable".to_string()))
    }

    fn log_rejection(&self, err: &NotecryptError) {
        if let NotecryptError::Decryption { reason } = err {
            tracing::debug!(scheme = %self.scheme(), "envelope rejected");
            tracing::trace!(%reason, "rejection reason");
        }
    }
}

impl FieldCipher for EncryptionEngine {
    fn encrypt_field(&self, plaintext: &str) -> Result<String> {
        self.encrypt(plaintext)
    }

    fn decrypt_field(&self, envelope: &str) -> Result<String> {
        self.decrypt(envelope)
    }
}

/// Validate decrypted bytes as non-empty UTF-8.
///
/// Rejected bytes are zeroized before they are dropped.
fn into_text(bytes: Vec<u8>) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(text) if text.is_empty() => Err(NotecryptError::decryption(DecryptFailure::Empty)),
        Ok(text) => Ok(text),
        Err(err) => {
            let mut rejected = err.into_bytes();
            rejected.zeroize();
            Err(NotecryptError::decryption(DecryptFailure::InvalidUtf8))
        }
    }
}
