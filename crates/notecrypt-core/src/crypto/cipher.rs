//! AES-256-CBC with PKCS#7 padding.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{DecryptFailure, NotecryptError, Result};

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// CBC IV length (one AES block) in bytes.
pub const IV_LEN: usize = 16;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt and pad `plaintext`.
pub(crate) fn encrypt_cbc(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let encryptor = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| NotecryptError::Encryption(format!("Failed to create cipher: {}", e)))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt `ciphertext` and strip its padding.
///
/// A padding failure is reported as [`DecryptFailure::Padding`]; it is the
/// first signal of a wrong key or tampered ciphertext.
pub(crate) fn decrypt_cbc(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(NotecryptError::decryption(DecryptFailure::Malformed));
    }

    let decryptor = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| NotecryptError::decryption(DecryptFailure::Malformed))?;
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| NotecryptError::decryption(DecryptFailure::Padding))
}
