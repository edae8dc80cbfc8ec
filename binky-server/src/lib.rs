//! binky-server library
//!
//! Bridges NFC reader devices to Logitech Media Server: tag events arrive on
//! a WebSocket, are resolved against the association store and turned into
//! `slim.request` JSON-RPC commands.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod events;
pub mod lms;
pub mod router;

pub use router::{EventRouter, RouteOutcome};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub router: EventRouter,
}

impl AppState {
    pub fn new(router: EventRouter) -> Self {
        Self { router }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ws", get(api::websocket_handler))
        .merge(api::status_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
