//! Input helpers for the CLI.

use std::io::{self, Read};

/// Use the argument when given, otherwise read all of stdin.
///
/// One trailing line ending is dropped from stdin so `echo text | notecrypt
/// encrypt` round-trips to `text`.
pub fn read_input(arg: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = arg {
        return Ok(value.to_string());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    strip_trailing_newline(&mut buffer);
    Ok(buffer)
}

/// Envelopes are base64, so surrounding whitespace is never significant.
pub fn read_envelope(arg: Option<&str>) -> anyhow::Result<String> {
    Ok(read_input(arg)?.trim().to_string())
}

/// Drop a single `\n` or `\r\n`.
pub fn strip_trailing_newline(value: &mut String) {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
}
