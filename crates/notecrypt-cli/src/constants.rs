//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used for unexpected failures)
/// - 2: Misuse of shell command (reserved by shells and clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unexpected failure.
    pub const INTERNAL: i32 = 1;

    /// Invalid configuration or key material.
    pub const CONFIGURATION: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Envelope could not be decrypted.
    pub const UNREADABLE: i32 = 5;
}
