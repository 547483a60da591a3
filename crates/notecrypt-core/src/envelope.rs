//! Envelope codec.
//!
//! An envelope is the only ciphertext format that gets persisted. It is a
//! single base64 token (standard alphabet, padded) over the binary layout:
//!
//! ```text
//! +----------+--------------------------+------------------------+
//! | marker 8 | header (IV or salt)      | ciphertext (n * 16)    |
//! +----------+--------------------------+------------------------+
//! ```
//!
//! | Scheme        | Marker     | Header        |
//! |---------------|------------|---------------|
//! | `raw-key`     | `RawKeyIV` | 16-byte IV    |
//! | `openssl-md5` | `Salted__` | 8-byte salt   |
//! | `argon2id`    | `Argon2id` | 16-byte salt  |
//!
//! The `Salted__` layout is the one produced by `openssl enc -md md5` and
//! CryptoJS passphrase encryption.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::crypto::{BLOCK_LEN, IV_LEN};
use crate::error::{DecryptFailure, NotecryptError, Result};

/// Length of every scheme marker.
pub const MARKER_LEN: usize = 8;

/// Salt length for `openssl-md5` envelopes.
pub const OPENSSL_SALT_LEN: usize = 8;

/// Salt length for `argon2id` envelopes.
pub const ARGON2_SALT_LEN: usize = 16;

const RAW_KEY_MARKER: &[u8; MARKER_LEN] = b"RawKeyIV";
const OPENSSL_MARKER: &[u8; MARKER_LEN] = b"Salted__";
const ARGON2_MARKER: &[u8; MARKER_LEN] = b"Argon2id";

/// Encryption scheme an envelope was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Raw 32-byte key, random IV stored in the envelope
    RawKey,
    /// Passphrase with OpenSSL `EVP_BytesToKey` (MD5), salt stored
    OpensslMd5,
    /// Passphrase with Argon2id, salt stored
    Argon2id,
}

impl Scheme {
    pub fn marker(&self) -> &'static [u8; MARKER_LEN] {
        match self {
            Scheme::RawKey => RAW_KEY_MARKER,
            Scheme::OpensslMd5 => OPENSSL_MARKER,
            Scheme::Argon2id => ARGON2_MARKER,
        }
    }

    /// Bytes between the marker and the ciphertext.
    pub fn header_len(&self) -> usize {
        match self {
            Scheme::RawKey => IV_LEN,
            Scheme::OpensslMd5 => OPENSSL_SALT_LEN,
            Scheme::Argon2id => ARGON2_SALT_LEN,
        }
    }

    fn from_marker(marker: &[u8]) -> Option<Self> {
        [Scheme::RawKey, Scheme::OpensslMd5, Scheme::Argon2id]
            .into_iter()
            .find(|scheme| scheme.marker().as_slice() == marker)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::RawKey => "raw-key",
            Scheme::OpensslMd5 => "openssl-md5",
            Scheme::Argon2id => "argon2id",
        };
        f.write_str(name)
    }
}

/// Per-envelope key parameters: the random IV or the KDF salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeHeader {
    RawKey { iv: [u8; IV_LEN] },
    OpensslMd5 { salt: [u8; OPENSSL_SALT_LEN] },
    Argon2id { salt: [u8; ARGON2_SALT_LEN] },
}

impl EnvelopeHeader {
    pub fn scheme(&self) -> Scheme {
        match self {
            EnvelopeHeader::RawKey { .. } => Scheme::RawKey,
            EnvelopeHeader::OpensslMd5 { .. } => Scheme::OpensslMd5,
            EnvelopeHeader::Argon2id { .. } => Scheme::Argon2id,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            EnvelopeHeader::RawKey { iv } => iv,
            EnvelopeHeader::OpensslMd5 { salt } => salt,
            EnvelopeHeader::Argon2id { salt } => salt,
        }
    }

    fn from_bytes(scheme: Scheme, bytes: &[u8]) -> Option<Self> {
        let header = match scheme {
            Scheme::RawKey => EnvelopeHeader::RawKey {
                iv: bytes.try_into().ok()?,
            },
            Scheme::OpensslMd5 => EnvelopeHeader::OpensslMd5 {
                salt: bytes.try_into().ok()?,
            },
            Scheme::Argon2id => EnvelopeHeader::Argon2id {
                salt: bytes.try_into().ok()?,
            },
        };
        Some(header)
    }
}

/// A decoded envelope: header plus padded ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub header: EnvelopeHeader,
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn scheme(&self) -> Scheme {
        self.header.scheme()
    }

    /// Serialize to the persisted text form.
    pub fn encode(&self) -> String {
        let header = self.header.as_bytes();
        let mut bytes = Vec::with_capacity(MARKER_LEN + header.len() + self.ciphertext.len());
        bytes.extend_from_slice(self.scheme().marker());
        bytes.extend_from_slice(header);
        bytes.extend_from_slice(&self.ciphertext);
        STANDARD.encode(bytes)
    }

    /// Parse the persisted text form.
    ///
    /// # Errors
    ///
    /// - `NotecryptError::Validation` if `encoded` is empty
    /// - `NotecryptError::Decryption` (`Malformed`) if the text is not base64,
    ///   the marker is unknown, the header is truncated, or the ciphertext is
    ///   not a non-zero multiple of the block size
    pub fn decode(encoded: &str) -> Result<Self> {
        if encoded.is_empty() {
            return Err(NotecryptError::Validation(
                "Envelope must be a non-empty string".to_string(),
            ));
        }

        let malformed = || NotecryptError::decryption(DecryptFailure::Malformed);

        let bytes = STANDARD.decode(encoded).map_err(|_| malformed())?;
        if bytes.len() < MARKER_LEN {
            return Err(malformed());
        }

        let (marker, rest) = bytes.split_at(MARKER_LEN);
        let scheme = Scheme::from_marker(marker).ok_or_else(malformed)?;
        if rest.len() < scheme.header_len() {
            return Err(malformed());
        }

        let (header, ciphertext) = rest.split_at(scheme.header_len());
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(malformed());
        }

        Ok(Self {
            header: EnvelopeHeader::from_bytes(scheme, header).ok_or_else(malformed)?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
