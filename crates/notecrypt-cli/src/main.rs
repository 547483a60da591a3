//! Notecrypt CLI - encrypt and decrypt note fields from the command line
//!
//! Thin front end over `notecrypt-core`: reads the key setup from the config
//! file and environment, then runs one command.

use clap::Parser;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod security;

use app::AppContext;
use cli::{Cli, Commands};
use commands::{
    handle_check, handle_completions, handle_decrypt, handle_encrypt, handle_gen_key,
    handle_init, handle_inspect, handle_open_note, handle_seal_note,
};
use errors::classify;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        let (message, code) = classify(&err);
        eprintln!("Error: {}", message);
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli)?;
    // A broken config is reported by the command that needs it.
    let filter = ctx
        .config()
        .ok()
        .and_then(|config| config.logging.filter.as_deref());
    logging::init(filter, cli.verbose);

    match &cli.command {
        Commands::Encrypt(args) => handle_encrypt(&ctx, args),
        Commands::Decrypt(args) => handle_decrypt(&ctx, args),
        Commands::SealNote(args) => handle_seal_note(&ctx, args),
        Commands::OpenNote(args) => handle_open_note(&ctx, args),
        Commands::Inspect(args) => handle_inspect(args),
        Commands::GenKey => handle_gen_key(),
        Commands::Check => handle_check(&ctx),
        Commands::Init(args) => handle_init(&ctx, args),
        Commands::Completions { shell } => handle_completions(*shell),
    }
}
