// src/service/mod.rs
//! Card service: ingestion and lookup over a [`CardStore`]
//!
//! Encryption and hashing happen here, explicitly, before anything reaches
//! storage; decryption happens only when a caller asks to reveal a number.

mod ingest;
mod lookup;

pub use ingest::{IngestReport, UploadReport};

use crate::config::Config;
use crate::core::IdentifierGenerator;
use crate::crypto::CardCipher;
use crate::db::CardStore;
use crate::parser::BatchFileParser;

pub struct CardService<S: CardStore> {
    store: S,
    cipher: CardCipher,
    ids: IdentifierGenerator,
    parser: BatchFileParser,
}

impl<S: CardStore> CardService<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self::with_parts(
            store,
            CardCipher::new(config),
            BatchFileParser::new(config),
        )
    }

    pub fn with_parts(store: S, cipher: CardCipher, parser: BatchFileParser) -> Self {
        CardService {
            store,
            cipher,
            ids: IdentifierGenerator::new(),
            parser,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cipher(&self) -> &CardCipher {
        &self.cipher
    }

    pub fn parser(&self) -> &BatchFileParser {
        &self.parser
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
