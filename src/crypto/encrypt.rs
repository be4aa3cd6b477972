// src/crypto/encrypt.rs
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;

use crate::aliases::CardKey32;
use crate::consts::NONCE_LENGTH;
use crate::error::CoreError;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Encrypt plaintext → base64(nonce || ciphertext || tag)
///
/// A fresh random 96-bit nonce is drawn for every call.
pub fn encrypt_to_envelope(plaintext: &[u8], key: &CardKey32) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key.expose_secret())
        .map_err(|e| CoreError::Crypto(e.to_string()))?;

    let mut nonce = [0u8; NONCE_LENGTH];
    rand::rng().fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CoreError::Crypto("encryption failed".into()))?;

    let mut out = Vec::with_capacity(NONCE_LENGTH + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(STANDARD.encode(out))
}
