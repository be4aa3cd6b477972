// src/crypto/mod.rs
//! Envelope encryption for card numbers: no I/O, no database
//!
//! AES-256-GCM with a per-call random nonce. The free functions work on raw
//! bytes; [`CardCipher`] binds them to the configured key and to the
//! card-number secret types.
mod decrypt;
mod encrypt;
mod key;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use decrypt::decrypt_envelope;
pub use encrypt::encrypt_to_envelope;
pub use key::derive_key;

use crate::aliases::{CardKey32, Passphrase, PlainCardNumber};
use crate::config::Config;
use crate::error::CoreError;
use crate::CoreResult as Result;

/// Base64 text form of nonce + ciphertext + tag; the only durable form of a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(String);

impl Envelope {
    pub fn new(encoded: String) -> Self {
        Envelope(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card-number codec bound to one derived key
pub struct CardCipher {
    key: CardKey32,
}

impl CardCipher {
    pub fn new(config: &Config) -> Self {
        Self::from_passphrase(&config.passphrase())
    }

    pub fn from_passphrase(passphrase: &Passphrase) -> Self {
        CardCipher {
            key: derive_key(passphrase),
        }
    }

    pub fn encrypt(&self, number: &PlainCardNumber) -> Result<Envelope> {
        encrypt_to_envelope(number.expose_secret().as_bytes(), &self.key).map(Envelope)
    }

    pub fn decrypt(&self, envelope: &Envelope) -> Result<PlainCardNumber> {
        let bytes = decrypt_envelope(envelope.as_str(), &self.key)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| CoreError::Crypto("decrypted value is not UTF-8".into()))?;
        Ok(PlainCardNumber::new(text))
    }
}

impl fmt::Debug for CardCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
