// tests/support.rs
//! Test utilities: configs, services and fixed-width batch files

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use card_vault::config::from_toml_str;
use card_vault::{CardService, Config, SqliteCardStore};

pub const TEST_PASSPHRASE: &str = "test-card-vault-secret-2025";

/// 51-char header taken from the reference batch layout
pub const HEADER: &str = "DESAFIO-HYPERATIVA           20180524LOTE0001000010";

pub fn test_config() -> Config {
    from_toml_str(&format!(
        r#"
        [keys]
        card_key = "{TEST_PASSPHRASE}"

        [paths]
        card_db = "unused.db"

        [upload]
        max_file_size = 10485760
        "#
    ))
    .expect("valid test config")
}

/// Fresh service over an in-memory database
pub fn memory_service() -> CardService<SqliteCardStore> {
    let store = SqliteCardStore::open_in_memory().expect("open in-memory card db");
    CardService::new(store, &test_config())
}

/// Service over an on-disk database (shared between services in a test)
pub fn file_service(db_path: &Path) -> CardService<SqliteCardStore> {
    let store = SqliteCardStore::open(db_path).expect("open card db");
    CardService::new(store, &test_config())
}

/// `C<seq>` in the first 7 columns, card number from column 7, padded to 51
pub fn record_line(seq: usize, number: &str) -> String {
    format!("{:<51}", format!("C{seq:<6}{number}"))
}

pub fn footer_line(count: usize) -> String {
    format!("LOTE0001{count:06}")
}

/// Complete batch file: header, one record per number, footer
pub fn batch_file(numbers: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for (i, number) in numbers.iter().enumerate() {
        out.push_str(&record_line(i + 1, number));
        out.push('\n');
    }
    out.push_str(&footer_line(numbers.len()));
    out.push('\n');
    out
}

pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/cards_upload_file.txt")
}
