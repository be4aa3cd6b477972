// src/consts.rs
//! Shared constants: fixed-width format offsets, crypto sizes and defaults

/// Exact number of digits a card number must have
pub const CARD_NUMBER_LENGTH: usize = 16;

/// Minimum length (in characters) of the batch file header line
pub const HEADER_MIN_LENGTH: usize = 51;

/// Record lines shorter than this are skipped
pub const RECORD_MIN_LENGTH: usize = 26;

/// Card number column: characters `[CARD_NUMBER_START, CARD_NUMBER_END)`
pub const CARD_NUMBER_START: usize = 7;
pub const CARD_NUMBER_END: usize = 26;

/// A line starting with this token is the footer and ends record scanning
pub const FOOTER_SENTINEL: &str = "LOTE";

/// Expected extension of upload files (advisory only)
pub const BATCH_FILE_EXTENSION: &str = "txt";

/// AES-GCM nonce length in bytes (96 bits)
pub const NONCE_LENGTH: usize = 12;

/// AES-GCM authentication tag length in bytes (128 bits)
pub const TAG_LENGTH: usize = 16;

/// Length of the hex-encoded SHA-256 search hash
pub const SEARCH_HASH_HEX_LENGTH: usize = 64;

/// Length of a Crockford base32 ULID
pub const EXTERNAL_ID_LENGTH: usize = 26;

/// Default maximum accepted upload size (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;

/// Default number of cards per listing page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Default database file name under the user data directory
pub const DEFAULT_DB_FILE_NAME: &str = "card-vault.db";
