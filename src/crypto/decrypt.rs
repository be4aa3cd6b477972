// src/crypto/decrypt.rs
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::aliases::CardKey32;
use crate::consts::NONCE_LENGTH;
use crate::error::CoreError;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Decrypt a base64 envelope → plaintext bytes
///
/// Fails on bad base64, on an envelope shorter than the nonce, and whenever
/// the authentication tag does not verify (wrong key or tampered data).
pub fn decrypt_envelope(envelope: &str, key: &CardKey32) -> Result<Vec<u8>> {
    let decoded = STANDARD
        .decode(envelope)
        .map_err(|e| CoreError::Crypto(format!("envelope is not valid base64: {e}")))?;

    if decoded.len() < NONCE_LENGTH {
        return Err(CoreError::Crypto(format!(
            "envelope too short ({} bytes)",
            decoded.len()
        )));
    }
    let (nonce, sealed) = decoded.split_at(NONCE_LENGTH);

    let cipher = Aes256Gcm::new_from_slice(key.expose_secret())
        .map_err(|e| CoreError::Crypto(e.to_string()))?;
    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CoreError::Crypto("authentication failed".into()))
}
