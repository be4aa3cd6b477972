//! SQLite-backed card store
//!
//! Ciphertext, search hash and external id go in; plaintext never does.
//! `save_batch` wraps every insert in one transaction, and the transaction
//! rolls back on drop, so any failed insert leaves the table untouched.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::card::{CardRecord, NewCard};
use crate::core::{ExternalId, SearchHash};
use crate::crypto::Envelope;
use crate::db::card_db_conn::{open_card_db, open_card_db_in_memory};
use crate::db::CardStore;
use crate::error::CoreError;
use crate::CoreResult as Result;

const INSERT_CARD: &str = "INSERT INTO cards (card_number, card_number_hash, external_id, created_at)
     VALUES (?1, ?2, ?3, ?4)";

const SELECT_CARD: &str =
    "SELECT id, card_number, card_number_hash, external_id, created_at FROM cards";

pub struct SqliteCardStore {
    conn: Connection,
}

impl SqliteCardStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        Ok(Self::from_connection(open_card_db(db_path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(open_card_db_in_memory()?))
    }

    /// Wrap a connection whose schema is already in place
    pub fn from_connection(conn: Connection) -> Self {
        SqliteCardStore { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn find_one(&self, column: &str, value: &str) -> Result<Option<CardRecord>> {
        let sql = format!("{SELECT_CARD} WHERE {column} = ?1");
        let record = self
            .conn
            .query_row(&sql, [value], row_to_record)
            .optional()?;
        Ok(record)
    }
}

impl CardStore for SqliteCardStore {
    fn save(&mut self, card: &NewCard) -> Result<CardRecord> {
        self.conn
            .execute(
                INSERT_CARD,
                params![
                    card.ciphertext().as_str(),
                    card.search_hash().as_str(),
                    card.external_id().as_str(),
                    card.created_at(),
                ],
            )
            .map_err(map_write_error)?;

        Ok(CardRecord {
            id: self.conn.last_insert_rowid(),
            ciphertext: card.ciphertext().clone(),
            search_hash: card.search_hash().clone(),
            external_id: card.external_id().clone(),
            created_at: card.created_at(),
        })
    }

    fn save_batch(&mut self, cards: &[NewCard]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_CARD)?;
            for card in cards {
                stmt.execute(params![
                    card.ciphertext().as_str(),
                    card.search_hash().as_str(),
                    card.external_id().as_str(),
                    card.created_at(),
                ])
                .map_err(map_write_error)?;
            }
        }
        tx.commit()?;
        Ok(cards.len())
    }

    fn find_by_hash(&self, hash: &SearchHash) -> Result<Option<CardRecord>> {
        self.find_one("card_number_hash", hash.as_str())
    }

    fn find_by_external_id(&self, id: &ExternalId) -> Result<Option<CardRecord>> {
        self.find_one("external_id", id.as_str())
    }

    fn page(&self, offset: u64, limit: u64) -> Result<Vec<CardRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_CARD} ORDER BY id LIMIT ?1 OFFSET ?2"))?;
        let rows = stmt.query_map(params![to_sql_int(limit), to_sql_int(offset)], row_to_record)?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<CardRecord> {
    Ok(CardRecord {
        id: row.get(0)?,
        ciphertext: Envelope::new(row.get(1)?),
        search_hash: SearchHash::from_hex(row.get(2)?),
        external_id: ExternalId::new(row.get::<_, String>(3)?),
        created_at: row.get(4)?,
    })
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// UNIQUE on the search hash means the card number is already stored
fn map_write_error(err: rusqlite::Error) -> CoreError {
    if let rusqlite::Error::SqliteFailure(ref code, Some(ref msg)) = err {
        if code.code == ErrorCode::ConstraintViolation && msg.contains("card_number_hash") {
            return CoreError::DuplicateCard;
        }
    }
    CoreError::Sql(err)
}
