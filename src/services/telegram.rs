// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Telegram adapter.
//!
//! Handles:
//! - Bot authorization at startup
//! - Sending text messages ([`ChatSender`])
//! - Long-polling updates and feeding them to the [`MessageRouter`]

use crate::error::AppError;
use crate::models::{InboundMessage, InboundUpdate, Location};
use crate::services::messaging::ChatSender;
use crate::services::router::MessageRouter;
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{Update, UpdateKind};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const SHUTDOWN_RETRY: Duration = Duration::from_millis(50);

/// Telegram implementation of [`ChatSender`].
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    /// Create the bot client and check the token against Telegram.
    pub async fn connect(token: &str) -> Result<Self, AppError> {
        let bot = Bot::new(token);
        let me = bot
            .get_me()
            .await
            .map_err(|e| AppError::BotInit(e.to_string()))?;

        tracing::info!(username = %me.username(), "Authorized on Telegram account");
        Ok(Self { bot })
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }
}

#[async_trait]
impl ChatSender for TelegramSender {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map(|_| ())
            .map_err(|e| AppError::Dispatch(format!("chat {}: {}", chat_id, e)))
    }
}

/// Map a Telegram update into the router's view of it.
pub fn inbound_from_update(update: &Update) -> InboundUpdate {
    let message = match &update.kind {
        UpdateKind::Message(msg) => Some(InboundMessage {
            chat_id: msg.chat.id.0,
            text: msg.text().map(str::to_owned),
            location: msg
                .location()
                .or_else(|| msg.venue().map(|v| &v.location))
                .map(|l| Location {
                    latitude: l.latitude,
                    longitude: l.longitude,
                }),
        }),
        _ => None,
    };

    InboundUpdate { message }
}

/// Long-poll Telegram until `cancel` fires.
///
/// Replies that fail to send are logged and dropped; they never stop the
/// loop.
pub async fn run_update_loop(
    bot: Bot,
    router: MessageRouter,
    sender: Arc<dyn ChatSender>,
    cancel: CancellationToken,
) {
    let handler = dptree::entry().endpoint(handle_update);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router, sender])
        .build();

    if cancel.is_cancelled() {
        tracing::info!("Shutdown requested before the update loop started");
        return;
    }

    // The dispatcher refuses shutdown until it is running, so keep asking.
    let shutdown = dispatcher.shutdown_token();
    let watcher = tokio::spawn(async move {
        cancel.cancelled().await;
        loop {
            match shutdown.shutdown() {
                Ok(stopped) => break stopped.await,
                Err(_) => tokio::time::sleep(SHUTDOWN_RETRY).await,
            }
        }
    });

    tracing::info!("Bot is replying on messages");
    dispatcher.dispatch().await;
    watcher.abort();
    tracing::info!("Update loop stopped");
}

async fn handle_update(
    update: Update,
    router: MessageRouter,
    sender: Arc<dyn ChatSender>,
) -> ResponseResult<()> {
    let inbound = inbound_from_update(&update);

    let Some(reply) = router.handle(&inbound).await else {
        tracing::debug!(update_id = ?update.id, "Update without a message, nothing to answer");
        return Ok(());
    };

    if let Err(e) = sender.send(&reply).await {
        tracing::warn!(error = %e, chat_id = reply.chat_id, "Error sending reply");
    }
    Ok(())
}
