use zeroize::Zeroizing;

/// Characters used for generated raw keys.
const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated raw keys; one byte per character.
pub const GENERATED_KEY_LEN: usize = 32;

/// Generate a random alphanumeric raw key.
///
/// Bytes at or above the largest multiple of the alphabet size are discarded
/// so every character is equally likely.
pub fn generate_key() -> anyhow::Result<Zeroizing<String>> {
    let limit = 256 - (256 % KEY_ALPHABET.len());
    let mut key = Zeroizing::new(String::with_capacity(GENERATED_KEY_LEN));
    let mut buf = Zeroizing::new([0u8; 64]);

    while key.len() < GENERATED_KEY_LEN {
        getrandom::getrandom(&mut buf[..])
            .map_err(|e| anyhow::anyhow!("Failed to generate key bytes: {}", e))?;
        for &byte in buf.iter() {
            if key.len() == GENERATED_KEY_LEN {
                break;
            }
            if (byte as usize) < limit {
                key.push(KEY_ALPHABET[byte as usize % KEY_ALPHABET.len()] as char);
            }
        }
    }

    Ok(key)
}
