// src/core/mod.rs
//! Building blocks shared by the card model and the service layer
pub mod hash;
pub mod identifier;

pub use hash::*;
pub use identifier::*;
