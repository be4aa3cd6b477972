// src/service/ingest.rs
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::CardService;
use crate::card::{CardNumber, CardSummary, NewCard};
use crate::db::CardStore;
use crate::error::CoreError;
use crate::parser::{ParseReport, ParsedBatch};
use crate::CoreResult as Result;

/// Outcome of one committed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub committed: usize,
    /// Candidates that were not exactly sixteen digits
    pub dropped_invalid: usize,
}

/// Parse + ingest outcome for a whole upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub parse: ParseReport,
    pub ingest: IngestReport,
}

impl<S: CardStore> CardService<S> {
    /// Store a single card number
    pub fn create_card(&mut self, card_number: &str) -> Result<CardSummary> {
        let number = CardNumber::parse(card_number)?;
        let card = NewCard::build(&number, &self.cipher, &self.ids)?;
        let record = self.store.save(&card)?;
        info!(id = record.id, external_id = %record.external_id, "card created");
        Ok(record.summary())
    }

    /// Build and commit every valid candidate as one atomic batch
    ///
    /// Candidates that are not exactly sixteen digits are dropped. If nothing
    /// survives the filter the call fails with `EmptyBatch` and storage is not
    /// touched. A duplicate anywhere in the batch rejects all of it.
    pub fn ingest<T: AsRef<str>>(&mut self, candidates: &[T]) -> Result<IngestReport> {
        let mut cards = Vec::with_capacity(candidates.len());
        let mut dropped_invalid = 0;

        for candidate in candidates {
            let Ok(number) = CardNumber::parse(candidate.as_ref()) else {
                dropped_invalid += 1;
                continue;
            };
            cards.push(NewCard::build(&number, &self.cipher, &self.ids)?);
        }

        if dropped_invalid > 0 {
            warn!(dropped_invalid, "dropped candidates with invalid card numbers");
        }
        if cards.is_empty() {
            return Err(CoreError::EmptyBatch);
        }

        let committed = self.store.save_batch(&cards)?;
        info!(committed, "batch committed");
        Ok(IngestReport {
            committed,
            dropped_invalid,
        })
    }

    /// Parse a batch file from disk and ingest it
    pub fn upload_file<P: AsRef<Path>>(&mut self, path: P) -> Result<UploadReport> {
        let parsed = self.parser.parse_file(path)?;
        self.ingest_parsed(parsed)
    }

    /// Parse an in-memory batch file and ingest it
    pub fn upload_bytes(&mut self, bytes: &[u8]) -> Result<UploadReport> {
        let parsed = self.parser.parse_bytes(bytes)?;
        self.ingest_parsed(parsed)
    }

    fn ingest_parsed(&mut self, parsed: ParsedBatch) -> Result<UploadReport> {
        let ingest = self.ingest(&parsed.card_numbers)?;
        Ok(UploadReport {
            parse: parsed.report,
            ingest,
        })
    }
}
