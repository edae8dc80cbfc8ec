//! Database models

use chrono::NaiveDateTime;
use serde::Serialize;

/// Persisted link from an NFC tag to an LMS playlist
///
/// Only live rows (`deleted_at IS NULL`) are ever returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Association {
    pub id: i64,
    pub tag_id: String,
    pub playlist_id: i64,
    pub created_at: NaiveDateTime,
}
