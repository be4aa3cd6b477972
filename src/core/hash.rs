//! Deterministic search hash
//!
//! Unsalted SHA-256 so equal card numbers always hash equal, which is what
//! makes exact-match lookup possible without decrypting anything. The input
//! domain is small; the hash store does not resist offline brute force.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Compute SHA-256 and return as lowercase hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Fixed-length hex digest standing in for a card number in equality queries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHash(String);

impl SearchHash {
    pub fn digest(plaintext: &str) -> Self {
        SearchHash(sha256_hex(plaintext.as_bytes()))
    }

    /// Wrap a digest read back from storage
    pub fn from_hex(hex: String) -> Self {
        SearchHash(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
