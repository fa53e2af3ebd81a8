//! Database layer: the user store abstraction and its backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryUserStore;

use crate::error::AppError;
use crate::models::UserRecord;
use async_trait::async_trait;
use validator::Validate;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Persistence for user registrations, keyed by chat ID.
///
/// Operations are independent; there is no transaction spanning them.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert the user unless a record for the same chat already exists.
    async fn save_if_absent(&self, user: &UserRecord) -> Result<(), AppError>;

    /// All registered users. An empty store yields an empty vector.
    async fn list_all(&self) -> Result<Vec<UserRecord>, AppError>;

    /// Persist the user's `updated` metadata. Fails if no record matched.
    async fn record_update(&self, user: &UserRecord) -> Result<(), AppError>;
}

/// Checks shared by every backend before a registration is stored.
pub(crate) fn ensure_registrable(user: &UserRecord) -> Result<(), AppError> {
    if user.is_empty() {
        return Err(AppError::NilInput(
            "insert data if not exist: user is empty".to_string(),
        ));
    }
    user.validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
