//! HTTP client for the LMS JSON-RPC endpoint

use std::time::Duration;

use async_trait::async_trait;
use binky_common::config::LmsConfig;
use binky_common::{Error, Result};
use tracing::debug;

use super::types::{LmsReply, LmsRequest};
use super::PlayerControl;

const USER_AGENT: &str = concat!("binky-server/", env!("CARGO_PKG_VERSION"));

/// JSON-RPC client for `http://{address}:{port}/jsonrpc.js`
///
/// Holds only immutable configuration; cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct LmsClient {
    http_client: reqwest::Client,
    url: String,
}

impl LmsClient {
    pub fn new(config: &LmsConfig) -> Result<Self> {
        Self::with_url(config.jsonrpc_url(), config.timeout())
    }

    /// Client for an explicit endpoint URL
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PlayerControl for LmsClient {
    async fn send_action(&self, device_id: &str, actions: &[String]) -> Result<LmsReply> {
        debug!(device_id = %device_id, actions = ?actions, "Send action to player");

        let request = LmsRequest::new(device_id, actions);

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "LMS returned HTTP {} for {}",
                status.as_u16(),
                self.url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| Error::Decode(format!("Invalid LMS reply: {}", e)))
    }
}
