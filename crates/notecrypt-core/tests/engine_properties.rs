use std::collections::HashSet;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proptest::prelude::*;

use notecrypt_core::envelope::MARKER_LEN;
use notecrypt_core::{
    DecryptFailure, EncryptionEngine, Envelope, KdfParams, KeyMaterial, NotecryptError,
    NoteFields, Scheme,
};

const KEY: &str = "01234567890123456789012345678901";
const OTHER_KEY: &str = "abcdefghijklmnopqrstuvwxyz012345";

fn raw_engine(key: &str) -> EncryptionEngine {
    EncryptionEngine::new(KeyMaterial::raw_key(key).expect("32-byte key"))
}

fn engines() -> Vec<EncryptionEngine> {
    vec![
        raw_engine(KEY),
        EncryptionEngine::new(KeyMaterial::openssl_passphrase(KEY).expect("passphrase")),
        EncryptionEngine::new(
            KeyMaterial::argon2_passphrase(KEY, KdfParams::new(64, 1, 1).expect("params"))
                .expect("passphrase"),
        ),
    ]
}

/// Flip one byte of the ciphertext portion of an envelope.
fn flip_ciphertext_byte(envelope: &str, scheme: Scheme, offset: usize) -> String {
    let mut bytes = STANDARD.decode(envelope).expect("valid base64");
    let start = MARKER_LEN + scheme.header_len();
    bytes[start + offset] ^= 0x5a;
    STANDARD.encode(bytes)
}

fn is_decryption_error(result: &notecrypt_core::Result<String>) -> bool {
    matches!(result, Err(NotecryptError::Decryption { .. }))
}

#[test]
fn test_hello_world_scenario() {
    let engine = raw_engine(KEY);

    let first = engine.encrypt("hello world").expect("encrypt");
    let second = engine.encrypt("hello world").expect("encrypt");

    assert_ne!(first, second);
    assert_eq!(engine.decrypt(&first).expect("decrypt"), "hello world");
    assert_eq!(engine.decrypt(&second).expect("decrypt"), "hello world");
}

#[test]
fn test_round_trip_every_scheme() {
    let samples = [
        "a",
        "hello world",
        "exactly sixteen!",
        "Grocery list: eggs, milk, bread, coffee",
        "ünïcödé — 日本語 — 🔐🗒️",
        "line one\nline two\r\n\ttabbed",
    ];

    for engine in engines() {
        for sample in samples {
            let envelope = engine.encrypt(sample).expect("encrypt");
            // Short samples can appear in base64 text by chance.
            if sample.len() >= 8 {
                assert!(!envelope.contains(sample));
            }
            assert_eq!(engine.decrypt(&envelope).expect("decrypt"), sample);
        }
    }
}

#[test]
fn test_large_field_round_trip() {
    let engine = raw_engine(KEY);
    let content = "lorem ipsum dolor sit amet ".repeat(40_000);

    let envelope = engine.encrypt(&content).expect("encrypt");
    assert_eq!(engine.decrypt(&envelope).expect("decrypt"), content);
}

#[test]
fn test_envelopes_never_repeat() {
    for engine in engines() {
        let envelopes: HashSet<String> = (0..20)
            .map(|_| engine.encrypt("same text").expect("encrypt"))
            .collect();
        assert_eq!(envelopes.len(), 20);
    }
}

#[test]
fn test_envelope_carries_engine_scheme() {
    for engine in engines() {
        let envelope = engine.encrypt("note").expect("encrypt");
        let decoded = Envelope::decode(&envelope).expect("decode");
        assert_eq!(decoded.scheme(), engine.scheme());
    }
}

#[test]
fn test_tampered_last_block_rejected() {
    for engine in engines() {
        let envelope = engine.encrypt("hello world").expect("encrypt");
        for offset in 0..16 {
            let tampered = flip_ciphertext_byte(&envelope, engine.scheme(), offset);
            let result = engine.decrypt(&tampered);
            assert!(
                is_decryption_error(&result),
                "scheme {} offset {} decrypted tampered ciphertext",
                engine.scheme(),
                offset
            );
        }
    }
}

#[test]
fn test_tampered_first_block_of_two_rejected() {
    let engine = raw_engine(KEY);
    let envelope = engine.encrypt("Grocery list: eggs, milk").expect("encrypt");

    let tampered = flip_ciphertext_byte(&envelope, Scheme::RawKey, 0);
    assert!(is_decryption_error(&engine.decrypt(&tampered)));
}

#[test]
fn test_wrong_raw_key_rejected() {
    let writer = raw_engine(KEY);
    let reader = raw_engine(OTHER_KEY);

    let envelope = writer.encrypt("hello world").expect("encrypt");
    assert!(is_decryption_error(&reader.decrypt(&envelope)));
}

#[test]
fn test_wrong_passphrase_rejected() {
    let writer = EncryptionEngine::new(KeyMaterial::openssl_passphrase(KEY).expect("key"));
    let reader = EncryptionEngine::new(KeyMaterial::openssl_passphrase(OTHER_KEY).expect("key"));

    let envelope = writer.encrypt("hello world").expect("encrypt");
    assert!(is_decryption_error(&reader.decrypt(&envelope)));
}

#[test]
fn test_mixed_schemes_not_interchangeable() {
    let all = engines();
    for (i, writer) in all.iter().enumerate() {
        let envelope = writer.encrypt("hello world").expect("encrypt");
        for (j, reader) in all.iter().enumerate() {
            if i == j {
                continue;
            }
            match reader.decrypt(&envelope) {
                Err(NotecryptError::Decryption { reason }) => {
                    assert_eq!(reason, DecryptFailure::SchemeMismatch)
                }
                other => panic!("expected scheme mismatch, got {:?}", other),
            }
        }
    }
}

#[test]
fn test_key_length_validation() {
    assert!(matches!(
        KeyMaterial::raw_key(&KEY[..31]),
        Err(NotecryptError::Configuration(_))
    ));
    assert!(matches!(
        KeyMaterial::raw_key(&format!("{}x", KEY)),
        Err(NotecryptError::Configuration(_))
    ));
    assert!(KeyMaterial::raw_key(KEY).is_ok());
}

#[test]
fn test_configuration_error_is_fatal() {
    let err = KeyMaterial::raw_key("too short").expect_err("short key");
    assert!(err.is_fatal());
}

#[test]
fn test_empty_inputs_rejected() {
    for engine in engines() {
        assert!(matches!(
            engine.encrypt(""),
            Err(NotecryptError::Validation(_))
        ));
        assert!(matches!(
            engine.decrypt(""),
            Err(NotecryptError::Validation(_))
        ));
    }
}

#[test]
fn test_garbage_envelope_rejected() {
    let engine = raw_engine(KEY);
    for garbage in ["hello world", "====", "UmF3S2V5SVY=", "U2FsdGVkX18BAgMEBQYHCA=="] {
        assert!(
            is_decryption_error(&engine.decrypt(garbage)),
            "{} was not rejected",
            garbage
        );
    }
}

#[test]
fn test_error_messages_do_not_leak_plaintext() {
    let writer = raw_engine(KEY);
    let reader = raw_engine(OTHER_KEY);
    let envelope = writer.encrypt("top secret plan").expect("encrypt");

    let err = reader.decrypt(&envelope).expect_err("wrong key");
    let message = format!("{} {:?}", err, err);
    assert!(!message.contains("top secret"));
    assert!(!message.contains(KEY));
    assert!(!message.contains(OTHER_KEY));
}

#[test]
fn test_concurrent_use_without_locking() {
    let engine = Arc::new(raw_engine(KEY));

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                for i in 0..50 {
                    let text = format!("worker {} note {}", worker, i);
                    let envelope = engine.encrypt(&text).expect("encrypt");
                    assert_eq!(engine.decrypt(&envelope).expect("decrypt"), text);
                }
            });
        }
    });
}

#[test]
fn test_note_fields_encrypted_independently() {
    let engine = raw_engine(KEY);
    let note = NoteFields::new("Same", "Same");

    let sealed = note.seal(&engine).expect("seal");
    assert_ne!(sealed.title, sealed.content);
    assert_eq!(engine.decrypt(&sealed.title).expect("title"), "Same");
    assert_eq!(engine.decrypt(&sealed.content).expect("content"), "Same");
    assert_eq!(sealed.open(&engine).expect("open"), note);
}

#[test]
fn test_note_with_tampered_content_fails_whole_note() {
    let engine = raw_engine(KEY);
    let mut sealed = NoteFields::new("Title", "hello world")
        .seal(&engine)
        .expect("seal");
    sealed.content = flip_ciphertext_byte(&sealed.content, Scheme::RawKey, 15);

    assert!(matches!(
        sealed.open(&engine),
        Err(NotecryptError::Decryption { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip(text in "\\PC{1,200}") {
        let engine = raw_engine(KEY);
        let envelope = engine.encrypt(&text).unwrap();
        prop_assert_eq!(engine.decrypt(&envelope).unwrap(), text);
    }

    #[test]
    fn prop_passphrase_round_trip(text in "\\PC{1,64}", passphrase in "[a-zA-Z0-9 ]{1,40}") {
        prop_assume!(!passphrase.trim().is_empty());
        let engine = EncryptionEngine::new(KeyMaterial::openssl_passphrase(&passphrase).unwrap());
        let envelope = engine.encrypt(&text).unwrap();
        prop_assert_eq!(engine.decrypt(&envelope).unwrap(), text);
    }

    #[test]
    fn prop_encryption_is_randomized(text in "\\PC{1,64}") {
        let engine = raw_engine(KEY);
        let first = engine.encrypt(&text).unwrap();
        let second = engine.encrypt(&text).unwrap();
        prop_assert_ne!(&first, &second);
        prop_assert_eq!(engine.decrypt(&first).unwrap(), engine.decrypt(&second).unwrap());
    }
}
