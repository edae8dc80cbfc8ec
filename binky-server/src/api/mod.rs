//! HTTP API handlers for binky-server

pub mod status;
pub mod ws;

pub use status::status_routes;
pub use ws::websocket_handler;
