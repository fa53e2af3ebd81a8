// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inbound message handling.
//!
//! A shared location registers the chat; anything else gets the
//! onboarding text. Message text is never parsed for commands.

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::{InboundUpdate, OutboundMessage, UserRecord};
use std::sync::Arc;
use std::time::Duration;

pub const ONBOARDING_REPLY: &str = "If you want to subscribe, Please send geolocation";
pub const SUBSCRIBED_REPLY: &str = "you subscribe on the weather forecast";
pub const FAILURE_REPLY: &str = "Something went wrong, provider is quilty";

/// Decides the reply for each inbound update.
#[derive(Clone)]
pub struct MessageRouter {
    store: Arc<dyn UserStore>,
    store_timeout: Duration,
}

impl MessageRouter {
    pub fn new(store: Arc<dyn UserStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// Reply for an update, or `None` when the update carries no message.
    pub async fn handle(&self, update: &InboundUpdate) -> Option<OutboundMessage> {
        let message = update.message.as_ref()?;
        let chat_id = message.chat_id;

        tracing::info!(
            chat_id,
            text = message.text.as_deref().unwrap_or_default(),
            has_location = message.location.is_some(),
            "Replying on message"
        );

        let Some(location) = message.location else {
            return Some(OutboundMessage::new(chat_id, ONBOARDING_REPLY));
        };

        let user = UserRecord::create(chat_id, location.latitude, location.longitude);
        match self.register(&user).await {
            Ok(()) => Some(OutboundMessage::new(chat_id, SUBSCRIBED_REPLY)),
            Err(e) => {
                tracing::error!(error = %e, code = e.code(), chat_id, "Failed to register user");
                Some(OutboundMessage::new(chat_id, FAILURE_REPLY))
            }
        }
    }

    async fn register(&self, user: &UserRecord) -> Result<(), AppError> {
        tokio::time::timeout(self.store_timeout, self.store.save_if_absent(user))
            .await
            .map_err(|_| {
                AppError::Timeout(format!(
                    "save user {} exceeded {:?}",
                    user.chat_id, self.store_timeout
                ))
            })?
    }
}
