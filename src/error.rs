// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with stable, machine-readable codes.

/// Application error type shared by the gateway, store, and bot layers.
///
/// Every variant carries a context detail; `code()` gives the stable code
/// that shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("ENV_PARSE_ERR: Failed to parse configuration : {0}")]
    Config(String),

    #[error("BOT_INIT_ERR: Failed to init new bot : {0}")]
    BotInit(String),

    #[error("BOT_SEND_MSG_ERR: Failed to send the message : {0}")]
    Dispatch(String),

    #[error("HTTP_SEND_REQUEST_ERR: Failed send request : {0}")]
    Gateway(String),

    #[error("HTTP_DECODE_ERR: Failed to decode weather response : {0}")]
    Decode(String),

    #[error("MAPPER_ENCODING_ERR: Failed encoding mapper : {0}")]
    Mapping(String),

    #[error("USER_REPO_ERR: Missing user record : {0}")]
    NilInput(String),

    #[error("USER_REPO_ERR: Invalid user record : {0}")]
    Validation(String),

    #[error("USER_REPO_ERR: Failed to look up user : {0}")]
    Lookup(String),

    #[error("USER_REPO_ERR: Failed to save user : {0}")]
    Save(String),

    #[error("USER_REPO_ERR: Failed to update user : {0}")]
    Update(String),

    #[error("STORE_TIMEOUT_ERR: Store operation timed out : {0}")]
    Timeout(String),

    #[error("DB_INIT_ERR: Database error : {0}")]
    Database(String),

    #[error("INTERNAL_ERR: Internal error : {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable error code, shared by all variants of the same family.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "ENV_PARSE_ERR",
            AppError::BotInit(_) => "BOT_INIT_ERR",
            AppError::Dispatch(_) => "BOT_SEND_MSG_ERR",
            AppError::Gateway(_) => "HTTP_SEND_REQUEST_ERR",
            AppError::Decode(_) => "HTTP_DECODE_ERR",
            AppError::Mapping(_) => "MAPPER_ENCODING_ERR",
            AppError::NilInput(_)
            | AppError::Validation(_)
            | AppError::Lookup(_)
            | AppError::Save(_)
            | AppError::Update(_) => "USER_REPO_ERR",
            AppError::Timeout(_) => "STORE_TIMEOUT_ERR",
            AppError::Database(_) => "DB_INIT_ERR",
            AppError::Internal(_) => "INTERNAL_ERR",
        }
    }

    /// True for errors raised by the user store.
    pub fn is_store_error(&self) -> bool {
        self.code() == "USER_REPO_ERR"
            || matches!(self, AppError::Timeout(_) | AppError::Database(_))
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
