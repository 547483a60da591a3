//! Cryptographic primitives for notecrypt.
//!
//! - **AES-256-CBC / PKCS#7** for field encryption
//! - **OpenSSL `EVP_BytesToKey`** (MD5) for CryptoJS-compatible passphrases
//! - **Argon2id** for memory-hard passphrase derivation
//!
//! ## Security Model
//!
//! - Key material is validated once and zeroized on drop
//! - Every encryption draws a fresh IV (raw key) or salt (passphrase)
//! - CBC carries no integrity tag: tampering and wrong keys are detected only
//!   through padding and UTF-8 checks on the decrypted bytes

mod cipher;
pub mod kdf;
pub mod key;

pub use cipher::{BLOCK_LEN, IV_LEN, KEY_LEN};
pub use kdf::KdfParams;
pub use key::{KeyMaterial, KeyMode};

pub(crate) use cipher::{decrypt_cbc, encrypt_cbc};
pub(crate) use kdf::{derive_argon2id, evp_bytes_to_key};

/// Fill `buf` from the operating system's RNG.
pub(crate) fn fill_random(buf: &mut [u8]) -> crate::Result<()> {
    getrandom::getrandom(buf).map_err(|e| {
        crate::NotecryptError::Encryption(format!("Failed to generate random bytes: {}", e))
    })
}
