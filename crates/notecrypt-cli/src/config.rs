use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use notecrypt_core::{KdfParams, KeyMode, NotecryptError};

/// Environment variable read for the secret when none is configured.
pub const DEFAULT_SECRET_ENV: &str = "ENCRYPTION_KEY";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NotecryptConfig {
    #[serde(default)]
    pub key: KeySection,
    #[serde(default)]
    pub argon2: Argon2Section,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySection {
    pub scheme: KeyScheme,
    pub secret_env: String,
    pub secret_file: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Section {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeyScheme {
    #[default]
    RawKey,
    OpensslMd5,
    Argon2id,
}

impl Default for KeySection {
    fn default() -> Self {
        Self {
            scheme: KeyScheme::default(),
            secret_env: DEFAULT_SECRET_ENV.to_string(),
            secret_file: None,
        }
    }
}

impl Default for Argon2Section {
    fn default() -> Self {
        let params = KdfParams::default();
        Self {
            memory_kib: params.memory_kib(),
            iterations: params.iterations(),
            parallelism: params.parallelism(),
        }
    }
}

impl NotecryptConfig {
    pub fn new(scheme: KeyScheme, secret_env: Option<String>, secret_file: Option<PathBuf>) -> Self {
        Self {
            key: KeySection {
                scheme,
                secret_env: secret_env.unwrap_or_else(|| DEFAULT_SECRET_ENV.to_string()),
                secret_file: secret_file.map(|path| path.to_string_lossy().to_string()),
            },
            argon2: Argon2Section::default(),
            logging: LoggingSection::default(),
        }
    }

    /// Key mode described by this config.
    ///
    /// Argon2 parameters are validated here so a bad `[argon2]` section fails
    /// at startup like any other key configuration error.
    pub fn key_mode(&self) -> Result<KeyMode, NotecryptError> {
        match self.key.scheme {
            KeyScheme::RawKey => Ok(KeyMode::RawKey),
            KeyScheme::OpensslMd5 => Ok(KeyMode::OpensslPassphrase),
            KeyScheme::Argon2id => {
                let params = KdfParams::new(
                    self.argon2.memory_kib,
                    self.argon2.iterations,
                    self.argon2.parallelism,
                )?;
                Ok(KeyMode::Argon2Passphrase(params))
            }
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotecryptConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &NotecryptConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notecrypt"));
        }
    }
    Ok(home_dir()?.join(".config").join("notecrypt"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
