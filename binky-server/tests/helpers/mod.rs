//! Test helpers for binky-server integration tests
//!
//! - RecordingPlayer: in-memory PlayerControl that records dispatched actions
//! - MockLms: in-process HTTP server standing in for the LMS JSON-RPC endpoint

#![allow(dead_code)]

pub mod mock_lms;
pub mod recording_player;

pub use mock_lms::{MockBehavior, MockLms};
pub use recording_player::RecordingPlayer;

use sqlx::SqlitePool;
use tempfile::TempDir;

/// Fresh association database in a temporary directory
///
/// Keep the TempDir alive for as long as the pool is used.
pub async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let pool = binky_common::db::init_database(&dir.path().join("binky.db"))
        .await
        .expect("Should initialize database");
    (dir, pool)
}
