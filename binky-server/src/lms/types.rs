//! JSON-RPC wire types for the Logitech Media Server `slim.request` API

use binky_common::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Method name of every LMS command request
pub const SLIM_REQUEST: &str = "slim.request";

/// Playlists whose name starts with this prefix are hidden on request
pub const SPOTIFY_PLAYLIST_PREFIX: &str = "Spotify :";

/// Outbound request: `{"method": "slim.request", "params": [device, [actions...]]}`
#[derive(Debug, Clone, Serialize)]
pub struct LmsRequest {
    pub method: &'static str,
    pub params: (String, Vec<String>),
}

impl LmsRequest {
    pub fn new(device_id: &str, actions: &[String]) -> Self {
        Self {
            method: SLIM_REQUEST,
            params: (device_id.to_string(), actions.to_vec()),
        }
    }
}

/// Reply envelope; `result` is method-specific and kept opaque
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LmsReply {
    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub result: Option<Value>,
}

/// Playlist as listed by the media server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistSummary {
    pub playlist_id: i64,
    pub name: String,
}

/// `result` payload of the `playlists` command
#[derive(Debug, Deserialize)]
struct PlaylistsResult {
    // Absent when the server has no playlists
    #[serde(default)]
    playlists_loop: Vec<PlaylistEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    id: i64,
    playlist: String,
}

impl LmsReply {
    /// Decode the reply of a `playlists` command
    ///
    /// With `hide_spotify` set, playlists named `Spotify :...` are dropped.
    pub fn into_playlists(self, hide_spotify: bool) -> Result<Vec<PlaylistSummary>> {
        let result = self
            .result
            .ok_or_else(|| Error::Decode("playlists reply has no result".to_string()))?;

        let playlists: PlaylistsResult = serde_json::from_value(result)
            .map_err(|e| Error::Decode(format!("Invalid playlists result: {}", e)))?;

        Ok(playlists
            .playlists_loop
            .into_iter()
            .filter(|p| !(hide_spotify && p.playlist.starts_with(SPOTIFY_PLAYLIST_PREFIX)))
            .map(|p| PlaylistSummary {
                playlist_id: p.id,
                name: p.playlist,
            })
            .collect())
    }
}
