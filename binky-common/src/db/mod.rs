//! Database models and queries

pub mod associations;
pub mod init;
pub mod models;

pub use associations::*;
pub use init::*;
pub use models::*;
