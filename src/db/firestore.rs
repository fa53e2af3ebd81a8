// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper implementing [`UserStore`].
//!
//! Users live in the `users` collection with the chat ID as document ID.

use crate::db::{collections, ensure_registrable, UserStore};
use crate::error::AppError;
use crate::models::UserRecord;
use async_trait::async_trait;
use firestore::{paths, FirestoreWritePrecondition};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator rejects real credentials; use an unauthenticated
        // connection there.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client for testing.
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Get a user by chat ID.
    pub async fn get_user(&self, chat_id: i64) -> Result<Option<UserRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&chat_id.to_string())
            .await
            .map_err(|e| AppError::Lookup(e.to_string()))
    }
}

#[async_trait]
impl UserStore for FirestoreDb {
    async fn save_if_absent(&self, user: &UserRecord) -> Result<(), AppError> {
        ensure_registrable(user)?;

        if self.get_user(user.chat_id).await?.is_some() {
            tracing::info!(
                chat_id = user.chat_id,
                "User already registered, keeping existing record"
            );
            return Ok(());
        }

        let _: UserRecord = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(user.document_id())
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Save(e.to_string()))?;

        tracing::info!(chat_id = user.chat_id, "User registered");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Lookup(e.to_string()))
    }

    async fn record_update(&self, user: &UserRecord) -> Result<(), AppError> {
        // Only `updated` is written, and only if the document still exists;
        // a vanished user must not be re-created by the scheduler.
        let _: UserRecord = self
            .get_client()?
            .fluent()
            .update()
            .fields(paths!(UserRecord::{updated}))
            .in_col(collections::USERS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(user.document_id())
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Update(format!("chat {}: {}", user.chat_id, e)))?;
        Ok(())
    }
}
