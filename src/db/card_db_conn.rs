// src/db/card_db_conn.rs
use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, Result};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS cards (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        card_number      TEXT NOT NULL,
        card_number_hash TEXT NOT NULL UNIQUE,
        external_id      TEXT NOT NULL UNIQUE,
        created_at       TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_cards_created_at ON cards(created_at);
"#;

/// Open (or create) the card database at `db_path`
pub fn open_card_db<P: AsRef<Path>>(db_path: P) -> Result<Connection> {
    if let Some(parent) = db_path.as_ref().parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let conn = Connection::open(db_path)?;
    // Concurrent writers should meet at the UNIQUE constraint, not at SQLITE_BUSY
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

/// Throwaway database, used by tests and dry runs
pub fn open_card_db_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}
