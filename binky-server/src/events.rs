//! Inbound messages from NFC reader devices
//!
//! Each WebSocket text frame carries one JSON envelope:
//!
//! ```json
//! { "msg": "nfc", "payload": { "msg": "present", "nfc_id": "04AABBCC", "mac_address": "00:11:22:33:44:55" } }
//! ```
//!
//! Envelopes with another `msg` are accepted and ignored. An `nfc` envelope
//! is validated into a [`TagEvent`]; missing or empty required fields are a
//! decode error.

use binky_common::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Envelope kind routed to the event router
pub const NFC_MESSAGE: &str = "nfc";

/// A validated tag event reported by a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// A tag was placed on the reader of `device_id`
    Present { tag_id: String, device_id: String },
    /// The tag was taken off the reader of `device_id`
    Removed { device_id: String },
}

impl TagEvent {
    pub fn device_id(&self) -> &str {
        match self {
            TagEvent::Present { device_id, .. } | TagEvent::Removed { device_id } => device_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    msg: String,
    #[serde(default)]
    payload: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NfcKind {
    Present,
    Removed,
}

#[derive(Debug, Deserialize)]
struct NfcPayload {
    msg: NfcKind,
    #[serde(default)]
    nfc_id: Option<String>,
    #[serde(default)]
    mac_address: Option<String>,
}

fn required(field: Option<String>, name: &str) -> Result<String> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Decode(format!("nfc payload is missing '{}'", name))),
    }
}

/// Decode one inbound message
///
/// Returns `Ok(None)` for well-formed envelopes that are not NFC events.
pub fn decode_message(text: &str) -> Result<Option<TagEvent>> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| Error::Decode(format!("Invalid message envelope: {}", e)))?;

    if envelope.msg != NFC_MESSAGE {
        return Ok(None);
    }

    let payload = envelope
        .payload
        .ok_or_else(|| Error::Decode("nfc message has no payload".to_string()))?;

    let payload: NfcPayload = serde_json::from_value(payload)
        .map_err(|e| Error::Decode(format!("Invalid nfc payload: {}", e)))?;

    let device_id = required(payload.mac_address, "mac_address")?;

    let event = match payload.msg {
        NfcKind::Present => TagEvent::Present {
            tag_id: required(payload.nfc_id, "nfc_id")?,
            device_id,
        },
        NfcKind::Removed => TagEvent::Removed { device_id },
    };

    Ok(Some(event))
}
