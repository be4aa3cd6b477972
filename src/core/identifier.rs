//! Opaque external identifiers
//!
//! ULIDs: 48-bit millisecond timestamp followed by 80 random bits, rendered
//! as 26 Crockford base32 characters, so lexical order follows creation time.
//! The monotonic generator keeps that order within a single millisecond too.

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use ulid::{Generator, Ulid};

use crate::error::CoreError;
use crate::CoreResult as Result;

/// Externally visible card handle, distinct from the storage primary key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    /// Wrap an identifier received from a caller or read back from storage
    pub fn new(id: impl Into<String>) -> Self {
        ExternalId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time encoded in the identifier, if it is a well-formed ULID
    pub fn timestamp_ms(&self) -> Option<u64> {
        Ulid::from_string(&self.0).ok().map(|u| u.timestamp_ms())
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Ulid> for ExternalId {
    fn from(id: Ulid) -> Self {
        ExternalId(id.to_string())
    }
}

/// Thread-safe source of sortable external identifiers
pub struct IdentifierGenerator {
    inner: Mutex<Generator>,
}

impl IdentifierGenerator {
    pub fn new() -> Self {
        IdentifierGenerator {
            inner: Mutex::new(Generator::new()),
        }
    }

    pub fn next(&self) -> Result<ExternalId> {
        // A poisoned lock still holds a usable generator
        let mut generator = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        generator
            .generate()
            .map(ExternalId::from)
            .map_err(|e| CoreError::Identifier(e.to_string()))
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdentifierGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierGenerator").finish_non_exhaustive()
    }
}
