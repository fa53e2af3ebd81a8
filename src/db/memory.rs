// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process user store backed by a concurrent map.
//!
//! Used for local runs without GCP (`STORE_BACKEND=memory`) and in tests.
//! Contents are lost when the process exits.

use crate::db::{ensure_registrable, UserStore};
use crate::error::AppError;
use crate::models::UserRecord;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Map from chat ID to its registration.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<i64, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored registrations.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Copy of the record for a chat, if any.
    pub fn get(&self, chat_id: i64) -> Option<UserRecord> {
        self.users.get(&chat_id).map(|u| u.value().clone())
    }

    /// Drop a record, simulating a user that vanished between read and write.
    pub fn remove(&self, chat_id: i64) -> Option<UserRecord> {
        self.users.remove(&chat_id).map(|(_, user)| user)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn save_if_absent(&self, user: &UserRecord) -> Result<(), AppError> {
        ensure_registrable(user)?;

        match self.users.entry(user.chat_id) {
            Entry::Occupied(_) => {
                tracing::info!(
                    chat_id = user.chat_id,
                    "User already registered, keeping existing record"
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                tracing::info!(chat_id = user.chat_id, "User registered");
            }
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, AppError> {
        let mut users: Vec<UserRecord> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| u.chat_id);
        Ok(users)
    }

    async fn record_update(&self, user: &UserRecord) -> Result<(), AppError> {
        let mut stored = self.users.get_mut(&user.chat_id).ok_or_else(|| {
            AppError::Update(format!("chat {}: no documents were updated", user.chat_id))
        })?;
        stored.updated = user.updated.clone();
        Ok(())
    }
}
