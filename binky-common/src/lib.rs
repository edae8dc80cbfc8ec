//! # Binky Common Library
//!
//! Shared code for the Binky NFC bridge:
//! - Error type used by every component
//! - TOML configuration loading
//! - Database initialization and the NFC tag / playlist association store

pub mod config;
pub mod db;
pub mod error;

pub use config::BinkyConfig;
pub use db::Association;
pub use error::{Error, Result};
