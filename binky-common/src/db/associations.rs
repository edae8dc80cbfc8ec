//! NFC tag / playlist association store
//!
//! Each operation is a single SQL statement so the uniqueness and existence
//! checks cannot race with a concurrent writer:
//! - add relies on the partial unique index over live rows
//! - delete decides `NotFound` from the rows-affected count

use crate::db::models::Association;
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// Associate an NFC tag with a playlist
///
/// Fails with [`Error::DuplicateAssociation`] if the tag already has a live
/// association; nothing is written in that case.
pub async fn add_association(db: &SqlitePool, tag_id: &str, playlist_id: i64) -> Result<()> {
    let result = sqlx::query("INSERT INTO nfc_cards (tag_id, playlist_id) VALUES (?, ?)")
        .bind(tag_id)
        .bind(playlist_id)
        .execute(db)
        .await;

    match result {
        Ok(_) => {
            debug!(tag_id = %tag_id, playlist_id, "Association added");
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(Error::DuplicateAssociation(tag_id.to_string()))
        }
        Err(e) => Err(Error::Database(e)),
    }
}

/// Remove the live association for an NFC tag
///
/// Fails with [`Error::NotFound`] if the tag has no live association.
pub async fn delete_association(db: &SqlitePool, tag_id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE nfc_cards
        SET deleted_at = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP
        WHERE tag_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(tag_id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(tag_id.to_string()));
    }

    debug!(tag_id = %tag_id, "Association deleted");
    Ok(())
}

/// Look up the live association for an NFC tag
pub async fn get_association(db: &SqlitePool, tag_id: &str) -> Result<Association> {
    sqlx::query_as::<_, Association>(
        r#"
        SELECT id, tag_id, playlist_id, created_at
        FROM nfc_cards
        WHERE tag_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(tag_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| Error::NotFound(tag_id.to_string()))
}

/// All live associations in insertion order
pub async fn list_associations(db: &SqlitePool) -> Result<Vec<Association>> {
    let associations = sqlx::query_as::<_, Association>(
        r#"
        SELECT id, tag_id, playlist_id, created_at
        FROM nfc_cards
        WHERE deleted_at IS NULL
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(associations)
}
