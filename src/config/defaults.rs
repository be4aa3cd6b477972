use std::path::PathBuf;

use crate::config::app::{Keys, Paths, Upload};
use crate::consts::{DEFAULT_DB_FILE_NAME, DEFAULT_MAX_FILE_SIZE};

pub const DEFAULT_CONFIG_PATH: &str = "card-vault.toml";
pub const DEFAULT_CARD_KEY: &str = "dev-card-vault-passphrase-2025";

pub fn default_keys() -> Keys {
    Keys {
        card_key: DEFAULT_CARD_KEY.into(),
    }
}

pub fn default_paths() -> Paths {
    let card_db = dirs::data_dir()
        .map(|dir| dir.join("card-vault").join(DEFAULT_DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
    Paths {
        card_db: card_db.to_string_lossy().into_owned(),
    }
}

pub fn default_upload() -> Upload {
    Upload {
        max_file_size: DEFAULT_MAX_FILE_SIZE,
    }
}
