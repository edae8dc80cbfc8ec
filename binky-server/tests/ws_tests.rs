//! End-to-end tests for the /ws device endpoint
//!
//! Tests cover:
//! - frames on one connection are routed in arrival order
//! - malformed frames do not close the connection
//! - binary frames carrying UTF-8 JSON are routed like text frames

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use binky_common::db::add_association;
use binky_server::{build_router, AppState, EventRouter};
use futures::SinkExt;
use helpers::{setup_test_db, RecordingPlayer};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

const DEVICE: &str = "00:11:22:33:44:55";

fn present(tag_id: &str) -> String {
    format!(
        r#"{{"msg":"nfc","payload":{{"msg":"present","nfc_id":"{}","mac_address":"{}"}}}}"#,
        tag_id, DEVICE
    )
}

fn removed() -> String {
    format!(
        r#"{{"msg":"nfc","payload":{{"msg":"removed","mac_address":"{}"}}}}"#,
        DEVICE
    )
}

/// Test helper: serve the full app on an ephemeral port
///
/// Returns the ws:// URL, the recording player and the server task.
async fn start_server() -> (TempDir, String, Arc<RecordingPlayer>, JoinHandle<()>) {
    let (dir, pool) = setup_test_db().await;
    add_association(&pool, "04AABBCC", 12).await.unwrap();

    let player = Arc::new(RecordingPlayer::new());
    let app = build_router(AppState::new(EventRouter::new(pool, player.clone())));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (dir, format!("ws://{}/ws", addr), player, server)
}

/// Wait until the player has seen `count` calls or give up after 5s
async fn wait_for_calls(player: &RecordingPlayer, count: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while player.calls().len() < count && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

fn action_names(player: &RecordingPlayer) -> Vec<String> {
    player
        .calls()
        .into_iter()
        .map(|call| {
            assert_eq!(call.device_id, DEVICE);
            call.actions[0].clone()
        })
        .collect()
}

#[tokio::test]
async fn test_frames_routed_in_order_and_garbage_keeps_connection() {
    let (_dir, url, player, server) = start_server().await;
    let (mut socket, _) = connect_async(url.as_str()).await.unwrap();

    socket.send(Message::Text("{not json".to_string())).await.unwrap();
    socket.send(Message::Text(present("04AABBCC"))).await.unwrap();
    socket
        .send(Message::Binary(removed().into_bytes()))
        .await
        .unwrap();

    wait_for_calls(&player, 3).await;

    assert_eq!(action_names(&player), vec!["playlistcontrol", "play", "stop"]);
    assert!(player.calls()[0]
        .actions
        .contains(&"playlist_id:12".to_string()));

    socket.close(None).await.unwrap();
    server.abort();
}

#[tokio::test]
async fn test_non_utf8_binary_frame_is_dropped() {
    let (_dir, url, player, server) = start_server().await;
    let (mut socket, _) = connect_async(url.as_str()).await.unwrap();

    socket
        .send(Message::Binary(vec![0xff, 0xfe, 0xfd]))
        .await
        .unwrap();
    socket.send(Message::Text(removed())).await.unwrap();

    wait_for_calls(&player, 1).await;

    assert_eq!(action_names(&player), vec!["stop"]);

    socket.close(None).await.unwrap();
    server.abort();
}

#[tokio::test]
async fn test_connections_are_independent() {
    let (_dir, url, player, server) = start_server().await;
    let (mut first, _) = connect_async(url.as_str()).await.unwrap();
    let (mut second, _) = connect_async(url.as_str()).await.unwrap();

    first.close(None).await.unwrap();
    drop(first);

    second.send(Message::Text(removed())).await.unwrap();
    wait_for_calls(&player, 1).await;

    assert_eq!(action_names(&player), vec!["stop"]);

    second.close(None).await.unwrap();
    server.abort();
}
