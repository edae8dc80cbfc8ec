//! WebSocket endpoint for NFC reader devices
//!
//! Each connection is served by its own task and reads one message at a
//! time: a message is routed to completion before the next is read, so a
//! device's events are handled strictly in arrival order. Routing failures
//! never close the connection.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::router::EventRouter;
use crate::AppState;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// GET /ws
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let connection_id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
    let router = state.router.clone();

    ws.on_upgrade(move |socket| {
        handle_socket(socket, router).instrument(info_span!("connection", id = connection_id))
    })
}

async fn handle_socket(mut socket: WebSocket, router: EventRouter) {
    info!("Device connected");

    while let Some(message) = socket.recv().await {
        match message {
            Ok(Message::Text(text)) => {
                let outcome = router.handle_message(&text).await;
                debug!(outcome = ?outcome, "Message handled");
            }
            Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => {
                    let outcome = router.handle_message(text).await;
                    debug!(outcome = ?outcome, "Message handled");
                }
                Err(e) => warn!(error = %e, "Dropping non UTF-8 binary message"),
            },
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by axum
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "WebSocket read failed");
                break;
            }
        }
    }

    info!("Device disconnected");
}
