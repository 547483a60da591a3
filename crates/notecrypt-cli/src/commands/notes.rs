use notecrypt_core::{EncryptedNote, NoteFields};

use crate::app::AppContext;
use crate::cli::{OpenNoteArgs, SealNoteArgs};
use crate::errors::CliError;
use crate::helpers::read_input;

pub fn handle_seal_note(ctx: &AppContext, args: &SealNoteArgs) -> anyhow::Result<()> {
    let note = match (args.title.as_deref(), args.content.as_deref()) {
        (Some(title), Some(content)) => NoteFields::new(title, content),
        (None, None) => {
            let json = read_input(None)?;
            serde_json::from_str::<NoteFields>(&json).map_err(|e| {
                CliError::invalid_input(format!(
                    "Expected a note as JSON with `title` and `content`: {}",
                    e
                ))
            })?
        }
        _ => {
            return Err(CliError::invalid_input("--title and --content must be given together").into())
        }
    };

    let sealed = note.seal(ctx.engine()?)?;
    println!("{}", serde_json::to_string_pretty(&sealed)?);
    Ok(())
}

pub fn handle_open_note(ctx: &AppContext, args: &OpenNoteArgs) -> anyhow::Result<()> {
    let json = read_input(args.note.as_deref())?;
    let sealed: EncryptedNote = serde_json::from_str(&json).map_err(|e| {
        CliError::invalid_input(format!(
            "Expected an encrypted note as JSON with `title` and `content`: {}",
            e
        ))
    })?;

    let note = sealed.open(ctx.engine()?)?;
    println!("{}", serde_json::to_string_pretty(&note)?);
    Ok(())
}
