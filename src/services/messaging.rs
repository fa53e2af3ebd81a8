// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound messaging capability shared by the router loop and the scheduler.

use crate::error::AppError;
use crate::models::OutboundMessage;
use async_trait::async_trait;

/// Sends plain-text messages to a chat.
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), AppError>;

    async fn send(&self, message: &OutboundMessage) -> Result<(), AppError> {
        self.send_text(message.chat_id, &message.text).await
    }
}
