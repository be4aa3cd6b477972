// src/lib.rs
//! card-vault: encrypted storage for payment card numbers
//!
//! Features:
//! - AES-256-GCM envelopes, plaintext never persisted
//! - SHA-256 search hash for exact-match lookup without decryption
//! - ULID external identifiers, sortable by creation time
//! - Fixed-width batch file parser with all-or-nothing ingestion

pub mod aliases;
pub mod card;
pub mod config;
pub mod consts;
pub mod core;
pub mod crypto;
pub mod db;
pub mod parser;
pub mod service;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{CardKey32, Passphrase, PlainCardNumber};
pub use card::{CardNumber, CardRecord, CardSummary, NewCard, Page};
pub use config::{load as load_config, Config};
pub use crate::core::{ExternalId, IdentifierGenerator, SearchHash};
pub use crypto::{CardCipher, Envelope};
pub use db::{CardStore, SqliteCardStore};
pub use error::CoreError;
pub use parser::{BatchFileParser, ParseReport, ParsedBatch, RecordParseWarning};
pub use service::{CardService, IngestReport, UploadReport};

pub type CoreResult<T> = std::result::Result<T, CoreError>;
