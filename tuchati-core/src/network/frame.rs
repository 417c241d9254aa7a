// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Frame Types
//!
//! Outbound frames form a closed set and are written as flat JSON records
//! tagged by `type`. Inbound frames are not validated: they are parsed as
//! JSON when possible and otherwise passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::NetworkError;
use super::transport::WireMessage;

/// Frame sent to the room endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    /// Chat content.
    Message(MessagePayload),
    /// The local user started typing.
    Typing,
    /// The local user stopped typing.
    StoppedTyping,
    /// The room view gained focus.
    Focus,
}

impl OutboundFrame {
    /// Plain text message with no extra fields.
    pub fn message(content: impl Into<String>) -> Self {
        OutboundFrame::Message(MessagePayload::new(content))
    }

    /// Encodes the frame for the wire.
    pub fn encode(&self) -> Result<String, NetworkError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Body of an outbound chat message.
///
/// `extra` carries optional fields (reply target, attachment reference...)
/// and is flattened next to `content`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MessagePayload {
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessagePayload {
    pub fn new(content: impl Into<String>) -> Self {
        MessagePayload {
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Adds an extra field to the record.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Frame received from the server.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// Payload parsed as JSON.
    Json(Value),
    /// Payload that is not JSON, delivered as-is.
    Text(String),
    /// Binary payload that is not valid UTF-8.
    Binary(Vec<u8>),
}

impl InboundFrame {
    /// Decodes a text payload, degrading to raw text when it is not JSON.
    pub fn decode_text(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => InboundFrame::Json(value),
            Err(_) => InboundFrame::Text(text),
        }
    }

    /// Decodes a wire message.
    ///
    /// UTF-8 binary payloads take the text path.
    pub fn decode(message: WireMessage) -> Self {
        match message {
            WireMessage::Text(text) => Self::decode_text(text),
            WireMessage::Binary(data) => match String::from_utf8(data) {
                Ok(text) => Self::decode_text(text),
                Err(e) => InboundFrame::Binary(e.into_bytes()),
            },
        }
    }

    /// Returns the JSON value, if the frame parsed as JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            InboundFrame::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// A stored or broadcast chat message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub sender: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Typed view over the inbound shapes the server is known to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Recent messages replayed right after connecting.
    History { messages: Vec<ChatMessage> },
    /// Another participant started or stopped typing.
    Typing { user: String, typing: bool },
    /// Another participant joined the room.
    Join { user: String },
    /// A chat message broadcast to the room.
    Message(ChatMessage),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedEvent {
    History {
        #[serde(default)]
        messages: Vec<ChatMessage>,
    },
    Typing {
        user: String,
        #[serde(default)]
        typing: bool,
    },
    Join {
        user: String,
    },
    Message(ChatMessage),
}

impl ServerEvent {
    /// Interprets a frame, returning `None` for anything unrecognised.
    ///
    /// Broadcast messages arrive untagged, so a record with `sender` and
    /// `content` and no `type` is read as a message.
    pub fn from_frame(frame: &InboundFrame) -> Option<Self> {
        let value = frame.as_json()?;
        let object = value.as_object()?;

        if object.contains_key("type") {
            let tagged = TaggedEvent::deserialize(value).ok()?;
            return Some(match tagged {
                TaggedEvent::History { messages } => ServerEvent::History { messages },
                TaggedEvent::Typing { user, typing } => ServerEvent::Typing { user, typing },
                TaggedEvent::Join { user } => ServerEvent::Join { user },
                TaggedEvent::Message(message) => ServerEvent::Message(message),
            });
        }

        ChatMessage::deserialize(value)
            .ok()
            .map(ServerEvent::Message)
    }
}
