//! Event router: tag events → association lookup → playback commands
//!
//! Stateless between events. Every failure is logged and the event is
//! considered handled; nothing is reported back to the device.

use std::sync::Arc;

use binky_common::db::get_association;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::events::{decode_message, TagEvent};
use crate::lms::PlayerControl;

/// What happened to one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Associated playlist was loaded and started on the device
    PlaylistLoaded { playlist_id: i64 },
    /// Tag has no association; nothing dispatched
    UnknownTag,
    /// Playback stopped after tag removal
    Stopped,
    /// Well-formed message that is not an NFC event
    Ignored,
    /// Message could not be decoded; nothing dispatched
    Malformed,
    /// Lookup or dispatch failed; error was logged
    Failed,
}

#[derive(Clone)]
pub struct EventRouter {
    db: SqlitePool,
    player: Arc<dyn PlayerControl>,
}

impl EventRouter {
    pub fn new(db: SqlitePool, player: Arc<dyn PlayerControl>) -> Self {
        Self { db, player }
    }

    /// Decode and route one raw message from a device connection
    pub async fn handle_message(&self, text: &str) -> RouteOutcome {
        match decode_message(text) {
            Ok(Some(event)) => self.route(event).await,
            Ok(None) => {
                debug!("Ignoring non-nfc message");
                RouteOutcome::Ignored
            }
            Err(e) => {
                warn!(error = %e, "Dropping malformed message");
                RouteOutcome::Malformed
            }
        }
    }

    /// Route one decoded tag event to the media server
    pub async fn route(&self, event: TagEvent) -> RouteOutcome {
        match event {
            TagEvent::Present { tag_id, device_id } => {
                debug!(tag_id = %tag_id, device_id = %device_id, "Got nfc message present");
                self.tag_present(&tag_id, &device_id).await
            }
            TagEvent::Removed { device_id } => {
                debug!(device_id = %device_id, "Got nfc message removed");
                self.tag_removed(&device_id).await
            }
        }
    }

    async fn tag_present(&self, tag_id: &str, device_id: &str) -> RouteOutcome {
        let association = match get_association(&self.db, tag_id).await {
            Ok(association) => association,
            Err(e) if e.is_not_found() => {
                info!(tag_id = %tag_id, device_id = %device_id, "NFC tag not found, event discarded");
                return RouteOutcome::UnknownTag;
            }
            Err(e) => {
                warn!(tag_id = %tag_id, error = %e, "Association lookup failed");
                return RouteOutcome::Failed;
            }
        };

        match self
            .player
            .load_playlist(device_id, association.playlist_id)
            .await
        {
            Ok(()) => {
                info!(
                    tag_id = %tag_id,
                    device_id = %device_id,
                    playlist_id = association.playlist_id,
                    "Playlist loaded"
                );
                RouteOutcome::PlaylistLoaded {
                    playlist_id: association.playlist_id,
                }
            }
            Err(e) => {
                warn!(
                    device_id = %device_id,
                    playlist_id = association.playlist_id,
                    error = %e,
                    "Failed to load playlist"
                );
                RouteOutcome::Failed
            }
        }
    }

    async fn tag_removed(&self, device_id: &str) -> RouteOutcome {
        match self.player.stop(device_id).await {
            Ok(()) => {
                info!(device_id = %device_id, "Playback stopped");
                RouteOutcome::Stopped
            }
            Err(e) => {
                warn!(device_id = %device_id, error = %e, "Failed to stop playback");
                RouteOutcome::Failed
            }
        }
    }
}
