//! In-process stand-in for the LMS `/jsonrpc.js` endpoint

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::task::JoinHandle;

/// How the mock answers every request
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// 200 with this JSON body
    Reply(Value),
    /// Empty body with this status
    Status(StatusCode),
    /// 200 with a body that is not JSON
    Garbage,
    /// Wait, then 200 with this JSON body
    Delayed(Duration, Value),
}

#[derive(Clone)]
struct MockState {
    behavior: MockBehavior,
    requests: Arc<Mutex<Vec<Value>>>,
}

pub struct MockLms {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
    handle: JoinHandle<()>,
}

async fn jsonrpc(State(state): State<MockState>, body: String) -> Response {
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(request);

    match state.behavior {
        MockBehavior::Reply(reply) => (StatusCode::OK, reply.to_string()).into_response(),
        MockBehavior::Status(status) => status.into_response(),
        MockBehavior::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
        MockBehavior::Delayed(delay, reply) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, reply.to_string()).into_response()
        }
    }
}

impl MockLms {
    pub async fn start(behavior: MockBehavior) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            behavior,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/jsonrpc.js", post(jsonrpc))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind mock LMS");
        let addr = listener.local_addr().expect("Should have local address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/jsonrpc.js", self.addr)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Request bodies received so far, in arrival order
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockLms {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
