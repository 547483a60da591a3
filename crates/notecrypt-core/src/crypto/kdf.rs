//! Passphrase key derivation.
//!
//! Both passphrase schemes turn `(passphrase, salt)` into 48 bytes of output:
//! a 32-byte AES-256 key followed by a 16-byte CBC IV. The IV is never stored
//! in the envelope; it is re-derived from the salt on decryption.
//!
//! - **OpenSSL `EVP_BytesToKey`** (MD5, one iteration): compatible with the
//!   `Salted__` format written by `openssl enc -md md5` and CryptoJS.
//! - **Argon2id**: memory-hard derivation for new deployments.

use argon2::Argon2;
use md5::{Digest, Md5};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use super::cipher::{IV_LEN, KEY_LEN};
use crate::error::{NotecryptError, Result};

/// Argon2id defaults: 64 MB memory, 3 iterations, single lane.
const ARGON2_MEMORY_KIB: u32 = 64 * 1024;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;

/// Bytes of key derivation output (key followed by IV).
const DERIVED_LEN: usize = KEY_LEN + IV_LEN;

/// Argon2id cost parameters.
///
/// These are deployment configuration, not per-envelope data: every process
/// reading the same envelopes must use the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl KdfParams {
    /// Build validated Argon2id parameters.
    ///
    /// # Errors
    ///
    /// Returns `NotecryptError::Configuration` if Argon2 rejects the costs
    /// (e.g. memory below `8 * parallelism` KiB, or zero iterations).
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params = Self {
            memory_kib,
            iterations,
            parallelism,
        };
        params.argon2_params()?;
        Ok(params)
    }

    pub fn memory_kib(&self) -> u32 {
        self.memory_kib
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    fn argon2_params(&self) -> Result<argon2::Params> {
        argon2::Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(DERIVED_LEN),
        )
        .map_err(|e| NotecryptError::Configuration(format!("Invalid Argon2 parameters: {}", e)))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: ARGON2_MEMORY_KIB,
            iterations: ARGON2_ITERATIONS,
            parallelism: ARGON2_PARALLELISM,
        }
    }
}

/// Key and IV derived from a passphrase and salt.
///
/// Zeroized on drop; never printed.
#[derive(ZeroizeOnDrop)]
pub(crate) struct DerivedKeyIv {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl DerivedKeyIv {
    fn from_output(output: &[u8; DERIVED_LEN]) -> Self {
        let mut key = [0u8; KEY_LEN];
        let mut iv = [0u8; IV_LEN];
        key.copy_from_slice(&output[..KEY_LEN]);
        iv.copy_from_slice(&output[KEY_LEN..]);
        Self { key, iv }
    }

    pub(crate) fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub(crate) fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for DerivedKeyIv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKeyIv")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

/// OpenSSL `EVP_BytesToKey` with MD5 and a single iteration.
///
/// `D_1 = MD5(passphrase || salt)`, `D_i = MD5(D_{i-1} || passphrase || salt)`,
/// concatenated until 48 bytes are available.
pub(crate) fn evp_bytes_to_key(passphrase: &[u8], salt: &[u8]) -> DerivedKeyIv {
    let mut output = Zeroizing::new([0u8; DERIVED_LEN]);
    let mut block = Zeroizing::new([0u8; 16]);
    let mut filled = 0;

    while filled < DERIVED_LEN {
        let mut hasher = Md5::new();
        if filled > 0 {
            hasher.update(&block[..]);
        }
        hasher.update(passphrase);
        hasher.update(salt);
        block.copy_from_slice(&hasher.finalize());

        let take = (DERIVED_LEN - filled).min(block.len());
        output[filled..filled + take].copy_from_slice(&block[..take]);
        filled += take;
    }

    DerivedKeyIv::from_output(&output)
}

/// Derive key and IV with Argon2id.
///
/// # Errors
///
/// Returns `NotecryptError::Encryption` if Argon2 rejects the salt or fails
/// to hash.
pub(crate) fn derive_argon2id(
    passphrase: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<DerivedKeyIv> {
    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params.argon2_params()?,
    );

    let mut output = Zeroizing::new([0u8; DERIVED_LEN]);
    argon2
        .hash_password_into(passphrase, salt, &mut output[..])
        .map_err(|e| NotecryptError::Encryption(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKeyIv::from_output(&output))
}
