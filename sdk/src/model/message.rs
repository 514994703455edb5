//! Transfer messages.
//!
//! On the wire a message is `type (u8) | payload`, and the transfer's
//! `message_size` field counts the type byte too.

use serde::{Deserialize, Serialize};

/// Message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Plain,
    /// Payload encrypted by the caller; the core only carries the bytes.
    Secure,
    /// Any other tag, carried verbatim.
    Raw(u8),
}

impl MessageType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Plain => 0,
            Self::Secure => 1,
            Self::Raw(tag) => *tag,
        }
    }

    pub fn from_u8(tag: u8) -> Self {
        match tag {
            0 => Self::Plain,
            1 => Self::Secure,
            other => Self::Raw(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    pub message_type: MessageType,
    pub payload: Vec<u8>,
}

impl Message {
    /// A UTF-8 plain message.
    pub fn plain(text: &str) -> Self {
        Self {
            message_type: MessageType::Plain,
            payload: text.as_bytes().to_vec(),
        }
    }

    pub fn raw(message_type: MessageType, payload: Vec<u8>) -> Self {
        Self {
            message_type,
            payload,
        }
    }

    /// An empty plain message. Still occupies one byte for the type.
    pub fn empty() -> Self {
        Self::plain("")
    }

    /// Encoded length including the type byte.
    pub fn size(&self) -> usize {
        1 + self.payload.len()
    }

    /// Payload as text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::empty()
    }
}
