//! Envelopes produced outside this crate must keep decrypting.
//!
//! The `Salted__` vectors were generated with
//! `openssl enc -aes-256-cbc -md md5 -pass pass:<KEY> -S <salt>`, the same
//! format CryptoJS writes for passphrase encryption. The raw-key vector was
//! generated with `openssl enc -aes-256-cbc -K <hex KEY> -iv 000102..0f`.

use notecrypt_core::{EncryptionEngine, Envelope, EnvelopeHeader, KeyMaterial, Scheme};

const KEY: &str = "01234567890123456789012345678901";

const OPENSSL_HELLO: &str = "U2FsdGVkX18BAgMEBQYHCGTX7zhr3BFQWp+UgC7+Ojs=";
const OPENSSL_GROCERIES: &str =
    "U2FsdGVkX1+hssPU5fYHGCoINFOdPTUBdfufx//72A3IEcjPwDKD1SZQLK+Rs7kL";
const RAW_KEY_HELLO: &str = "UmF3S2V5SVYAAQIDBAUGBwgJCgsMDQ4PX8xb6TvOdrDMtlrx8M1sag==";

#[test]
fn test_openssl_envelopes_decrypt() {
    let engine = EncryptionEngine::new(KeyMaterial::openssl_passphrase(KEY).expect("key"));

    assert_eq!(engine.decrypt(OPENSSL_HELLO).expect("decrypt"), "hello world");
    assert_eq!(
        engine.decrypt(OPENSSL_GROCERIES).expect("decrypt"),
        "Grocery list: eggs, milk"
    );
}

#[test]
fn test_openssl_envelope_header() {
    let envelope = Envelope::decode(OPENSSL_GROCERIES).expect("decode");
    assert_eq!(envelope.scheme(), Scheme::OpensslMd5);
    assert_eq!(
        envelope.header,
        EnvelopeHeader::OpensslMd5 {
            salt: [0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6, 0x07, 0x18]
        }
    );
    assert_eq!(envelope.ciphertext.len(), 32);
}

#[test]
fn test_raw_key_envelope_decrypts() {
    let engine = EncryptionEngine::new(KeyMaterial::raw_key(KEY).expect("key"));
    assert_eq!(engine.decrypt(RAW_KEY_HELLO).expect("decrypt"), "hello world");
}

#[test]
fn test_known_envelopes_reencode_identically() {
    for encoded in [OPENSSL_HELLO, OPENSSL_GROCERIES, RAW_KEY_HELLO] {
        let envelope = Envelope::decode(encoded).expect("decode");
        assert_eq!(envelope.encode(), encoded);
    }
}

#[test]
fn test_openssl_envelope_rejected_by_raw_engine() {
    let engine = EncryptionEngine::new(KeyMaterial::raw_key(KEY).expect("key"));
    assert!(engine.decrypt(OPENSSL_HELLO).is_err());
}
