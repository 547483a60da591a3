use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use notecrypt_core::VERSION;

/// Notecrypt - at-rest encryption for note fields
#[derive(Parser)]
#[command(name = "notecrypt")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "NOTECRYPT_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (overrides the configured filter)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a field into an envelope
    Encrypt(EncryptArgs),

    /// Decrypt an envelope back into text
    Decrypt(DecryptArgs),

    /// Encrypt a note's title and content
    SealNote(SealNoteArgs),

    /// Decrypt an encrypted note
    OpenNote(OpenNoteArgs),

    /// Show an envelope's scheme and sizes without decrypting it
    Inspect(InspectArgs),

    /// Generate a random 32-character raw key
    GenKey,

    /// Validate configuration and key material
    Check,

    /// Write a default config file
    Init(InitArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `encrypt` command
#[derive(Args)]
pub struct EncryptArgs {
    /// Text to encrypt (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    /// Envelope to decrypt (reads stdin when omitted)
    #[arg(value_name = "ENVELOPE")]
    pub envelope: Option<String>,
}

/// Arguments for the `seal-note` command
#[derive(Args)]
pub struct SealNoteArgs {
    /// Note title (with --content; otherwise a JSON note is read from stdin)
    #[arg(long)]
    pub title: Option<String>,

    /// Note content
    #[arg(long)]
    pub content: Option<String>,
}

/// Arguments for the `open-note` command
#[derive(Args)]
pub struct OpenNoteArgs {
    /// Encrypted note as JSON (reads stdin when omitted)
    #[arg(value_name = "JSON")]
    pub note: Option<String>,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Envelope to inspect (reads stdin when omitted)
    #[arg(value_name = "ENVELOPE")]
    pub envelope: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Encryption scheme to configure
    #[arg(long, value_enum, default_value_t = SchemeArg::RawKey)]
    pub scheme: SchemeArg,

    /// Environment variable holding the secret
    #[arg(long, value_name = "NAME")]
    pub secret_env: Option<String>,

    /// File holding the secret (takes precedence over the environment)
    #[arg(long, value_name = "PATH")]
    pub secret_file: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SchemeArg {
    RawKey,
    OpensslMd5,
    Argon2id,
}
