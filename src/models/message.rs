// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat messages as seen by the router, independent of the Telegram types.

/// One inbound event from the chat platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundUpdate {
    /// `None` for updates that carry no message (edits, callbacks, ...)
    pub message: Option<InboundMessage>,
}

/// Message part of an inbound update.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub text: Option<String>,
    pub location: Option<Location>,
}

/// Location attached to a message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reply to be sent to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
}

impl OutboundMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

impl InboundUpdate {
    /// Plain-text message, mostly useful for tests.
    pub fn text(chat_id: i64, text: &str) -> Self {
        Self {
            message: Some(InboundMessage {
                chat_id,
                text: Some(text.to_string()),
                location: None,
            }),
        }
    }

    /// Location message, mostly useful for tests.
    pub fn location(chat_id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            message: Some(InboundMessage {
                chat_id,
                text: None,
                location: Some(Location {
                    latitude,
                    longitude,
                }),
            }),
        }
    }
}
