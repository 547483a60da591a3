//! Application context for the Notecrypt CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config file and the
//! encryption engine built from it.

use std::env::VarError;
use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;
use zeroize::Zeroizing;

use notecrypt_core::{EncryptionEngine, KeyMaterial};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, NotecryptConfig};
use crate::errors::CliError;
use crate::helpers::strip_trailing_newline;

const CHECK_HINT: &str = "Hint: Run `notecrypt check` to validate the key setup.";

pub struct AppContext<'a> {
    cli: &'a Cli,
    config_path: PathBuf,
    config: OnceCell<NotecryptConfig>,
    engine: OnceCell<EncryptionEngine>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        Ok(Self {
            cli,
            config_path: resolve_config_path(cli)?,
            config: OnceCell::new(),
            engine: OnceCell::new(),
        })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, loaded on first use. A missing file means defaults.
    pub fn config(&self) -> anyhow::Result<&NotecryptConfig> {
        self.config.get_or_try_init(|| {
            if !self.config_path.exists() {
                return Ok(NotecryptConfig::default());
            }
            read_config(&self.config_path)
                .map_err(|e| CliError::configuration(e.to_string(), CHECK_HINT).into())
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The engine for the configured scheme, built on first use.
    pub fn engine(&self) -> anyhow::Result<&EncryptionEngine> {
        self.engine.get_or_try_init(|| build_engine(self.config()?))
    }
}

/// `--config` / `NOTECRYPT_CONFIG` when set, otherwise the XDG default.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(value) = cli.config.as_deref() {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

fn build_engine(config: &NotecryptConfig) -> anyhow::Result<EncryptionEngine> {
    let mode = config.key_mode()?;
    let secret = resolve_secret(config)?;
    let key = KeyMaterial::new(&secret, mode)?;
    tracing::debug!(scheme = %key.scheme(), "key material loaded");
    Ok(EncryptionEngine::new(key))
}

/// Read the secret from `secret_file` when configured, else from the
/// environment variable named by `secret_env`.
pub fn resolve_secret(config: &NotecryptConfig) -> anyhow::Result<Zeroizing<String>> {
    if let Some(path) = config.key.secret_file.as_deref() {
        let mut contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
            CliError::configuration(
                format!("Failed to read secret file {}: {}", path, e),
                CHECK_HINT,
            )
        })?);
        strip_trailing_newline(&mut contents);
        return Ok(contents);
    }

    let name = config.key.secret_env.as_str();
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(Zeroizing::new(value)),
        Err(VarError::NotUnicode(_)) => Err(CliError::configuration(
            format!("{} is set but its value is not valid UTF-8", name),
            format!("Hint: Re-export {} as UTF-8 text.", name),
        )
        .into()),
        _ => Err(CliError::configuration(
            format!("No secret found: {} is not set", name),
            format!("Hint: Export {} or set `secret_file` in the config.", name),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyScheme;

    #[test]
    fn test_secret_file_trailing_newline_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret");
        std::fs::write(&path, "01234567890123456789012345678901\n").unwrap();

        let config = NotecryptConfig::new(KeyScheme::RawKey, None, Some(path));
        let secret = resolve_secret(&config).unwrap();
        assert_eq!(secret.as_str(), "01234567890123456789012345678901");
        assert!(build_engine(&config).is_ok());
    }

    #[test]
    fn test_missing_secret_env_is_configuration_error() {
        let config = NotecryptConfig::new(
            KeyScheme::RawKey,
            Some("NOTECRYPT_TEST_UNSET_SECRET".into()),
            None,
        );
        let err = resolve_secret(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Configuration { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_secret_env_is_configuration_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = "NOTECRYPT_TEST_NON_UTF8_SECRET";
        std::env::set_var(name, OsStr::from_bytes(&[0x66, 0x6f, 0x80, 0x6f]));
        let config = NotecryptConfig::new(KeyScheme::RawKey, Some(name.into()), None);

        let err = resolve_secret(&config).unwrap_err();
        std::env::remove_var(name);

        let message = err.to_string();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Configuration { .. })
        ));
        assert!(message.contains("not valid UTF-8"));
        assert!(!message.contains("is not set"));
    }

    #[test]
    fn test_missing_secret_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            NotecryptConfig::new(KeyScheme::RawKey, None, Some(dir.path().join("absent")));
        let err = build_engine(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Configuration { .. })
        ));
    }
}
