// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret wrappers used throughout card-vault.
//! Anything holding key material or a plaintext card number goes through
//! one of these so it is zeroized on drop and redacted in `Debug`.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(CardKey32, 32); // 256-bit AES-GCM key derived from the passphrase

// Dynamic secrets
dynamic_alias!(Passphrase, String); // Externally configured secret the key is derived from
dynamic_alias!(PlainCardNumber, String); // Transient plaintext card number, never persisted
