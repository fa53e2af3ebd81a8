// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weather-Bot: daily weather forecasts over Telegram
//!
//! Users register by sharing a location with the bot; once a day the bot
//! fetches the current weather for every registered location and sends it
//! back to the chat.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::{Config, StoreBackend};
use db::{FirestoreDb, MemoryUserStore, UserStore};
use error::AppError;
use std::sync::Arc;

/// Open the user store selected by the configuration.
pub async fn open_store(config: &Config) -> Result<Arc<dyn UserStore>, AppError> {
    let store: Arc<dyn UserStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store, registrations are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };
    Ok(store)
}
