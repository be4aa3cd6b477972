use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::aliases::Passphrase;
use crate::error::CoreError;
use crate::CoreResult as Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub keys: Keys,
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_upload")]
    pub upload: Upload,
}

#[derive(Clone, Deserialize)]
pub struct Keys {
    /// Passphrase the card encryption key is derived from
    pub card_key: String,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("card_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub card_db: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Upload {
    /// Largest accepted batch file, in bytes
    pub max_file_size: u64,
}

impl Config {
    /// Passphrase wrapped so it zeroizes once the cipher has been built
    pub fn passphrase(&self) -> Passphrase {
        Passphrase::new(self.keys.card_key.clone())
    }

    fn validate(self) -> Result<Self> {
        if self.keys.card_key.is_empty() {
            return Err(CoreError::Config("keys.card_key must not be empty".into()));
        }
        if self.upload.max_file_size == 0 {
            return Err(CoreError::Config(
                "upload.max_file_size must be greater than zero".into(),
            ));
        }
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: default_keys(),
            paths: default_paths(),
            upload: default_upload(),
        }
    }
}

/// Parse a config document
pub fn from_toml_str(content: &str) -> Result<Config> {
    let conf: Config = toml::from_str(content)?;
    conf.validate()
}

/// Load a config file, then apply env overrides
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let conf = from_toml_str(&content)?;
    apply_env_overrides(conf).validate()
}

/// Load config at runtime: falls back to defaults if the file is missing
pub fn load() -> Result<Config> {
    let config_path =
        std::env::var("CARD_VAULT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if Path::new(&config_path).exists() {
        return load_from(&config_path);
    }

    warn!(path = %config_path, "config file not found, using built-in defaults");
    apply_env_overrides(Config::default()).validate()
}

fn apply_env_overrides(mut conf: Config) -> Config {
    if let Ok(key) = std::env::var("CARD_VAULT_KEY") {
        conf.keys.card_key = key;
    }
    if let Ok(db) = std::env::var("CARD_VAULT_DB") {
        conf.paths.card_db = db;
    }
    conf
}
