//! Playback dispatch to Logitech Media Server
//!
//! [`PlayerControl`] is the seam between the event router and the media
//! server. The only primitive is [`PlayerControl::send_action`]; the
//! composite commands are provided on top of it so every implementation
//! issues the same action sequences.
//!
//! No retries and no backoff: every failure is returned to the caller.

pub mod client;
pub mod types;

pub use client::LmsClient;
pub use types::{LmsReply, LmsRequest, PlaylistSummary, SPOTIFY_PLAYLIST_PREFIX};

use async_trait::async_trait;
use binky_common::Result;
use tracing::debug;

/// Device id used for server-wide queries that target no player
pub const NO_PLAYER: &str = "-";

/// Page window used when listing playlists
const PLAYLISTS_PAGE: (&str, &str) = ("0", "999");

/// Actions loading a saved playlist on a player, starting at its first track
pub fn load_playlist_actions(playlist_id: i64) -> Vec<String> {
    vec![
        "playlistcontrol".to_string(),
        "play_index:0".to_string(),
        "cmd:load".to_string(),
        "menu:1".to_string(),
        format!("playlist_id:{}", playlist_id),
        "useContextMenu:1".to_string(),
    ]
}

#[async_trait]
pub trait PlayerControl: Send + Sync {
    /// Send one `slim.request` with the given actions to a player
    async fn send_action(&self, device_id: &str, actions: &[String]) -> Result<LmsReply>;

    /// Load a playlist on a player and start playback
    ///
    /// `play` is only sent if loading succeeded.
    async fn load_playlist(&self, device_id: &str, playlist_id: i64) -> Result<()> {
        debug!(device_id = %device_id, playlist_id, "Loading playlist");

        self.send_action(device_id, &load_playlist_actions(playlist_id))
            .await?;
        self.send_action(device_id, &["play".to_string()]).await?;

        Ok(())
    }

    /// Stop playback on a player
    async fn stop(&self, device_id: &str) -> Result<()> {
        self.send_action(device_id, &["stop".to_string()]).await?;
        Ok(())
    }

    /// List the playlists known to the media server
    async fn list_playlists(&self, hide_spotify: bool) -> Result<Vec<PlaylistSummary>> {
        let actions = [
            "playlists".to_string(),
            PLAYLISTS_PAGE.0.to_string(),
            PLAYLISTS_PAGE.1.to_string(),
        ];

        self.send_action(NO_PLAYER, &actions)
            .await?
            .into_playlists(hide_spotify)
    }
}
