//! Room data messages
//!
//! Clients publish these as UTF-8 JSON over the room's reliable data channel
//! to talk to the automated participant.

use serde::{Deserialize, Serialize};

/// Messages exchanged over the room data channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataMessage {
    /// Free text typed by the user
    UserText { text: String },
}

impl DataMessage {
    /// Build a user text message, or `None` if the text is blank
    pub fn user_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(DataMessage::UserText {
            text: text.to_string(),
        })
    }

    /// Encode to the wire payload
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a wire payload. Invalid UTF-8 sequences are replaced rather
    /// than rejected.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_str(&String::from_utf8_lossy(payload))
    }

    /// The trimmed user text, if this message carries any
    pub fn text(&self) -> Option<&str> {
        match self {
            DataMessage::UserText { text } => Some(text.trim()).filter(|t| !t.is_empty()),
        }
    }
}
