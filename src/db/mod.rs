//! Storage collaborator for card records
//!
//! [`CardStore`] is the seam the service writes through. It owns primary key
//! assignment, uniqueness, and batch atomicity; the service never locks
//! anything itself. [`SqliteCardStore`] is the bundled implementation.

pub mod card_db_conn;
pub mod card_db_ops;

pub use card_db_conn::{open_card_db, open_card_db_in_memory};
pub use card_db_ops::SqliteCardStore;

use crate::card::{CardRecord, NewCard};
use crate::core::{ExternalId, SearchHash};
use crate::CoreResult as Result;

pub trait CardStore {
    /// Persist one card and return it with its assigned id.
    /// A duplicate search hash yields `CoreError::DuplicateCard`.
    fn save(&mut self, card: &NewCard) -> Result<CardRecord>;

    /// Persist every card or none of them; returns the number committed
    fn save_batch(&mut self, cards: &[NewCard]) -> Result<usize>;

    fn find_by_hash(&self, hash: &SearchHash) -> Result<Option<CardRecord>>;

    fn find_by_external_id(&self, id: &ExternalId) -> Result<Option<CardRecord>>;

    /// Records ordered by id
    fn page(&self, offset: u64, limit: u64) -> Result<Vec<CardRecord>>;

    fn count(&self) -> Result<u64>;
}
