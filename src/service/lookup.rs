// src/service/lookup.rs
use super::CardService;
use crate::aliases::PlainCardNumber;
use crate::card::{CardRecord, CardSummary, Page};
use crate::core::{ExternalId, SearchHash};
use crate::db::CardStore;
use crate::error::CoreError;
use crate::CoreResult as Result;

impl<S: CardStore> CardService<S> {
    /// Exact match on the search hash; stored envelopes are never decrypted
    pub fn find_by_number(&self, card_number: &str) -> Result<CardRecord> {
        let hash = SearchHash::digest(card_number);
        self.store.find_by_hash(&hash)?.ok_or(CoreError::NotFound)
    }

    pub fn find_by_external_id(&self, external_id: &str) -> Result<CardRecord> {
        self.store
            .find_by_external_id(&ExternalId::new(external_id))?
            .ok_or(CoreError::NotFound)
    }

    /// Ordered page of summaries; no card numbers are decrypted
    pub fn list_page(&self, offset: u64, limit: u64) -> Result<Page<CardSummary>> {
        let items = self
            .store
            .page(offset, limit)?
            .iter()
            .map(CardRecord::summary)
            .collect();
        Ok(Page {
            items,
            offset,
            limit,
            total: self.store.count()?,
        })
    }

    /// Decrypt the stored number behind an external identifier
    pub fn reveal_card_number(&self, external_id: &str) -> Result<PlainCardNumber> {
        self.find_by_external_id(external_id)?.reveal(&self.cipher)
    }
}
