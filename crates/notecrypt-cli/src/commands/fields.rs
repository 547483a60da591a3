use notecrypt_core::Envelope;

use crate::app::AppContext;
use crate::cli::{DecryptArgs, EncryptArgs, InspectArgs};
use crate::helpers::{read_envelope, read_input};

pub fn handle_encrypt(ctx: &AppContext, args: &EncryptArgs) -> anyhow::Result<()> {
    let plaintext = read_input(args.text.as_deref())?;
    let envelope = ctx.engine()?.encrypt(&plaintext)?;
    println!("{}", envelope);
    Ok(())
}

pub fn handle_decrypt(ctx: &AppContext, args: &DecryptArgs) -> anyhow::Result<()> {
    let envelope = read_envelope(args.envelope.as_deref())?;
    let plaintext = ctx.engine()?.decrypt(&envelope)?;
    println!("{}", plaintext);
    Ok(())
}

/// Describe an envelope's structure. Needs no key and never decrypts.
pub fn handle_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let encoded = read_envelope(args.envelope.as_deref())?;
    let envelope = Envelope::decode(&encoded)?;
    let scheme = envelope.scheme();

    if args.json {
        let output = serde_json::json!({
            "scheme": scheme.to_string(),
            "header_bytes": scheme.header_len(),
            "ciphertext_bytes": envelope.ciphertext.len(),
            "blocks": envelope.ciphertext.len() / notecrypt_core::crypto::BLOCK_LEN,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Scheme:     {}", scheme);
    println!("Header:     {} bytes", scheme.header_len());
    println!(
        "Ciphertext: {} bytes ({} blocks)",
        envelope.ciphertext.len(),
        envelope.ciphertext.len() / notecrypt_core::crypto::BLOCK_LEN
    );
    Ok(())
}
