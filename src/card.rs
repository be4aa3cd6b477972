// src/card.rs
//! Card data model
//!
//! A card number exists in plaintext only inside [`CardNumber`] /
//! [`PlainCardNumber`]. What gets persisted is a [`NewCard`]: the envelope, the
//! search hash and the external identifier, all produced together from the
//! same plaintext in [`NewCard::build`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::aliases::PlainCardNumber;
use crate::consts::CARD_NUMBER_LENGTH;
use crate::core::{ExternalId, IdentifierGenerator, SearchHash};
use crate::crypto::{CardCipher, Envelope};
use crate::error::CoreError;
use crate::CoreResult as Result;

/// Exactly sixteen ASCII digits
pub fn is_valid_card_number(candidate: &str) -> bool {
    candidate.len() == CARD_NUMBER_LENGTH && candidate.bytes().all(|b| b.is_ascii_digit())
}

/// A plaintext card number that passed validation
pub struct CardNumber(PlainCardNumber);

impl CardNumber {
    pub fn parse(candidate: &str) -> Result<Self> {
        if !is_valid_card_number(candidate) {
            return Err(CoreError::InvalidCardNumber {
                expected: CARD_NUMBER_LENGTH,
            });
        }
        Ok(CardNumber(PlainCardNumber::new(candidate.to_owned())))
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn search_hash(&self) -> SearchHash {
        SearchHash::digest(self.expose_secret())
    }

    pub fn as_plain(&self) -> &PlainCardNumber {
        &self.0
    }
}

impl std::fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CardNumber([REDACTED])")
    }
}

/// A card ready to be written; carries no plaintext
#[derive(Debug, Clone)]
pub struct NewCard {
    ciphertext: Envelope,
    search_hash: SearchHash,
    external_id: ExternalId,
    created_at: DateTime<Utc>,
}

impl NewCard {
    /// Encrypt, hash and assign an identifier in one step
    pub fn build(
        number: &CardNumber,
        cipher: &CardCipher,
        ids: &IdentifierGenerator,
    ) -> Result<Self> {
        let ciphertext = cipher.encrypt(number.as_plain())?;
        let search_hash = number.search_hash();
        let external_id = ids.next()?;
        debug!(external_id = %external_id, "built card record");
        Ok(NewCard {
            ciphertext,
            search_hash,
            external_id,
            created_at: Utc::now(),
        })
    }

    pub fn ciphertext(&self) -> &Envelope {
        &self.ciphertext
    }

    pub fn search_hash(&self) -> &SearchHash {
        &self.search_hash
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A persisted card as read back from storage
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    /// Storage-assigned primary key
    pub id: i64,
    pub ciphertext: Envelope,
    pub search_hash: SearchHash,
    pub external_id: ExternalId,
    pub created_at: DateTime<Utc>,
}

impl CardRecord {
    pub fn summary(&self) -> CardSummary {
        CardSummary {
            id: self.id,
            external_id: self.external_id.clone(),
        }
    }

    /// Decrypt the stored envelope on demand
    pub fn reveal(&self, cipher: &CardCipher) -> Result<PlainCardNumber> {
        cipher.decrypt(&self.ciphertext)
    }
}

/// What callers get back: never the number, never the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub id: i64,
    pub external_id: ExternalId,
}

/// One page of an ordered listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.offset + (self.items.len() as u64) < self.total
    }
}
