// src/config/mod.rs
//! Configuration system for card-vault
//!
//! TOML file + env overrides. The loaded [`Config`] is handed to the cipher,
//! parser and service constructors by reference; there is no global.

pub use app::{from_toml_str, load, load_from, Config, Keys, Paths, Upload};

mod app;
mod defaults;
