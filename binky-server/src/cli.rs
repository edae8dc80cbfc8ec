//! `binky-server db ...` management commands
//!
//! Commands return the text to print. Any error is fatal to the command;
//! nothing is retried.

use std::collections::HashMap;
use std::path::Path;

use binky_common::db::{add_association, delete_association, init_database, list_associations};
use binky_common::{Association, Result};
use clap::Subcommand;
use tracing::warn;

use crate::lms::{PlayerControl, PlaylistSummary};

pub const DONE: &str = "✔ Done";

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DbCommand {
    /// List NFC/Playlist associations
    List,
    /// Add new NFC/Playlist association
    Add {
        /// NFC tag id
        nfc: String,
        /// LMS playlist id
        playlist_id: i64,
    },
    /// Delete an NFC/Playlist association
    Delete {
        /// NFC tag id
        nfc: String,
    },
    /// List all available LMS playlists and their id
    ListPlaylist {
        /// Also show Spotify playlists
        #[arg(short, long)]
        spotify: bool,
    },
}

impl DbCommand {
    /// What the command does, for error context
    pub fn describe(&self) -> String {
        match self {
            DbCommand::List => "list NFC/Playlist associations".to_string(),
            DbCommand::Add { nfc, playlist_id } => {
                format!("add playlist assoc {} -> {}", nfc, playlist_id)
            }
            DbCommand::Delete { nfc } => format!("delete playlist assoc {}", nfc),
            DbCommand::ListPlaylist { .. } => "list LMS playlists".to_string(),
        }
    }
}

/// Run one management command against the database at `db_path`
pub async fn run_db_command(
    command: DbCommand,
    db_path: &Path,
    player: &dyn PlayerControl,
) -> Result<String> {
    match command {
        DbCommand::List => {
            let db = init_database(db_path).await?;
            let associations = list_associations(&db).await?;
            let names = playlist_names(player).await;
            Ok(render_associations(&associations, &names))
        }
        DbCommand::Add { nfc, playlist_id } => {
            let db = init_database(db_path).await?;
            add_association(&db, &nfc, playlist_id).await?;
            Ok(DONE.to_string())
        }
        DbCommand::Delete { nfc } => {
            let db = init_database(db_path).await?;
            delete_association(&db, &nfc).await?;
            Ok(DONE.to_string())
        }
        DbCommand::ListPlaylist { spotify } => {
            let playlists = player.list_playlists(!spotify).await?;
            Ok(render_playlists(&playlists))
        }
    }
}

/// Playlist names keyed by id, empty if the media server cannot be reached
async fn playlist_names(player: &dyn PlayerControl) -> HashMap<i64, String> {
    match player.list_playlists(false).await {
        Ok(playlists) => playlists
            .into_iter()
            .map(|p| (p.playlist_id, p.name))
            .collect(),
        Err(e) => {
            warn!(error = %e, "Could not fetch playlist names from LMS");
            HashMap::new()
        }
    }
}

/// Box-drawn table of associations with their playlist names
pub fn render_associations(associations: &[Association], names: &HashMap<i64, String>) -> String {
    let mut out = String::from("List of NFC/Playlist:\n");
    out.push_str("┌────────────┬─────────────┬───────────────────────────────────────────────────────┐\n");
    out.push_str("│   NFC ID   │ Playlist ID │ Name                                                  │\n");
    out.push_str("├────────────┼─────────────┼───────────────────────────────────────────────────────┤\n");

    for assoc in associations {
        let name = names.get(&assoc.playlist_id).map(String::as_str).unwrap_or("");
        out.push_str(&format!(
            "│{:<12}│{:<13}│{:<55}│\n",
            assoc.tag_id, assoc.playlist_id, name
        ));
    }

    out.push_str("└────────────┴─────────────┴───────────────────────────────────────────────────────┘");
    out
}

/// One `name [id]` line per playlist
pub fn render_playlists(playlists: &[PlaylistSummary]) -> String {
    let mut out = String::from("List LMS playlists:");
    for p in playlists {
        out.push_str(&format!("\n{} [{}]", p.name, p.playlist_id));
    }
    out
}
