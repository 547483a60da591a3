//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use notecrypt_core::NotecryptError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Configuration or key material is unusable
    Configuration { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// An envelope could not be decrypted
    Unreadable,

    /// The cipher failed on valid input
    Internal(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Configuration { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::Unreadable => {
                write!(f, "Content unreadable (wrong key or damaged envelope)")
            }
            CliError::Internal(message) => write!(f, "Failed to process request: {}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a Configuration error with message and hint.
    pub fn configuration(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::Configuration {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::Configuration { .. } => exit_codes::CONFIGURATION,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Unreadable => exit_codes::UNREADABLE,
            CliError::Internal(_) => exit_codes::INTERNAL,
        }
    }
}

impl From<&NotecryptError> for CliError {
    fn from(err: &NotecryptError) -> Self {
        match err {
            NotecryptError::Configuration(message) => CliError::configuration(
                message.clone(),
                "Hint: Run `notecrypt check` after fixing the key configuration.",
            ),
            NotecryptError::Validation(message) => CliError::invalid_input(message.clone()),
            NotecryptError::Decryption { .. } => CliError::Unreadable,
            NotecryptError::Encryption(message) => CliError::Internal(message.clone()),
        }
    }
}

/// Resolve any error into the message and exit code to report.
pub fn classify(err: &anyhow::Error) -> (String, i32) {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return (cli_err.to_string(), cli_err.exit_code());
    }
    if let Some(core_err) = err.downcast_ref::<NotecryptError>() {
        let cli_err = CliError::from(core_err);
        return (cli_err.to_string(), cli_err.exit_code());
    }
    (format!("{:#}", err), crate::constants::exit_codes::INTERNAL)
}
