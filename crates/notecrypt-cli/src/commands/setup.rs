use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;

use notecrypt_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, InitArgs, SchemeArg};
use crate::config::{write_config, KeyScheme, NotecryptConfig};
use crate::errors::CliError;
use crate::security::generate_key;

const SELF_TEST_TEXT: &str = "notecrypt self-test";

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let path = ctx.config_path();
    if path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            path.display()
        ))
        .into());
    }

    let scheme = match args.scheme {
        SchemeArg::RawKey => KeyScheme::RawKey,
        SchemeArg::OpensslMd5 => KeyScheme::OpensslMd5,
        SchemeArg::Argon2id => KeyScheme::Argon2id,
    };
    let config = NotecryptConfig::new(
        scheme,
        args.secret_env.clone(),
        args.secret_file.as_deref().map(PathBuf::from),
    );
    write_config(path, &config)?;

    if !ctx.quiet() {
        println!("Wrote config to {}", path.display());
        match config.key.secret_file.as_deref() {
            Some(file) => println!("Secret will be read from {}", file),
            None => println!("Secret will be read from ${}", config.key.secret_env),
        }
    }
    Ok(())
}

/// Build the engine from the current config and run one round-trip.
pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let envelope = engine.encrypt(SELF_TEST_TEXT)?;
    if engine.decrypt(&envelope)? != SELF_TEST_TEXT {
        return Err(CliError::Internal("self-test round-trip mismatch".to_string()).into());
    }

    if !ctx.quiet() {
        let path = ctx.config_path();
        if path.exists() {
            println!("Config:  {}", path.display());
        } else {
            println!("Config:  {} (not found, using defaults)", path.display());
        }
        println!("Scheme:  {}", engine.scheme());
        println!("Version: {}", VERSION);
    }
    println!("OK");
    Ok(())
}

pub fn handle_gen_key() -> anyhow::Result<()> {
    let key = generate_key()?;
    println!("{}", key.as_str());
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "notecrypt", &mut std::io::stdout());
    Ok(())
}
