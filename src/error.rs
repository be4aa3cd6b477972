// src/error.rs
//! Public error type for the entire crate
//!
//! Only fatal conditions live here. Per-line problems found while scanning a
//! batch file are advisory and reported through
//! [`ParseReport`](crate::parser::ParseReport) instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("File is empty or missing")]
    EmptyInput,

    #[error("File size ({size} bytes) exceeds maximum allowed size ({max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error(
        "Invalid file format: header at line {line} is missing or too short \
         (expected {expected} chars, got {actual})"
    )]
    InvalidHeader {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("No valid card numbers found in file")]
    EmptyBatch,

    #[error("Invalid card number: expected exactly {expected} digits")]
    InvalidCardNumber { expected: usize },

    #[error("Crypto operation failed: {0}")]
    Crypto(String),

    #[error("Card already exists")]
    DuplicateCard,

    #[error("Card not found")]
    NotFound,

    #[error("Identifier generation failed: {0}")]
    Identifier(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),
}

impl CoreError {
    /// True when the failure is a uniqueness conflict ("already exists")
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::DuplicateCard)
    }

    /// True when the caller supplied unusable input ("bad input")
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            CoreError::EmptyInput
                | CoreError::FileTooLarge { .. }
                | CoreError::InvalidHeader { .. }
                | CoreError::EmptyBatch
                | CoreError::InvalidCardNumber { .. }
        )
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}
