// src/crypto/key.rs
use sha2::{Digest, Sha256};

use crate::aliases::{CardKey32, Passphrase};

/// Derive the 256-bit card key from the configured passphrase
///
/// A single unsalted SHA-256 over the UTF-8 passphrase. This is fast and not
/// memory-hard, so it is only sound while the passphrase is a high-entropy
/// secret. Existing envelopes depend on this exact derivation.
pub fn derive_key(passphrase: &Passphrase) -> CardKey32 {
    let digest = Sha256::digest(passphrase.expose_secret().as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    CardKey32::new(bytes)
}
