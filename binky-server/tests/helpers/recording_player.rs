//! PlayerControl test double recording every dispatched action

use std::sync::Mutex;

use async_trait::async_trait;
use binky_common::{Error, Result};
use binky_server::lms::{LmsReply, PlayerControl};
use serde_json::Value;

/// One recorded `send_action` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedAction {
    pub device_id: String,
    pub actions: Vec<String>,
}

#[derive(Default)]
pub struct RecordingPlayer {
    calls: Mutex<Vec<DispatchedAction>>,
    /// 1-based index of the call that fails with a transport error
    fail_on_call: Option<usize>,
    result: Option<Value>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player whose n-th call (1-based) fails; later calls succeed again
    pub fn failing_on_call(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::default()
        }
    }

    /// Player answering every call with this `result` payload
    pub fn with_result(result: Value) -> Self {
        Self {
            result: Some(result),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<DispatchedAction> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayerControl for RecordingPlayer {
    async fn send_action(&self, device_id: &str, actions: &[String]) -> Result<LmsReply> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(DispatchedAction {
                device_id: device_id.to_string(),
                actions: actions.to_vec(),
            });
            calls.len()
        };

        if self.fail_on_call == Some(call_number) {
            return Err(Error::Transport("connection refused".to_string()));
        }

        Ok(LmsReply {
            method: Some("slim.request".to_string()),
            result: self.result.clone(),
        })
    }
}
