//! User registration record for storage.

use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registered user, one per chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserRecord {
    /// Opaque identity
    pub id: Uuid,
    /// Telegram chat ID (also used as document ID)
    pub chat_id: i64,
    /// Location the user shared
    #[validate(nested)]
    pub coordinates: Coordinates,
    /// When and by whom the record was created
    pub created: Modification,
    /// Last successful notification, if any
    pub updated: Option<Modification>,
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Timestamp plus actor of a change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    /// RFC3339 UTC timestamp
    pub at: String,
    /// Actor (the chat ID as a decimal string)
    pub by: String,
}

impl Modification {
    fn now_by(chat_id: i64) -> Self {
        Self {
            at: format_utc_rfc3339(Utc::now()),
            by: chat_id.to_string(),
        }
    }
}

impl UserRecord {
    /// Build a fresh record for a chat that just shared its location.
    pub fn create(chat_id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            chat_id,
            coordinates: Coordinates {
                latitude,
                longitude,
            },
            created: Modification::now_by(chat_id),
            updated: None,
        }
    }

    /// Stamp the update metadata. Coordinates are never touched.
    pub fn touch(&mut self) {
        self.updated = Some(Modification::now_by(self.chat_id));
    }

    /// A default-constructed record stands for "no user".
    pub fn is_empty(&self) -> bool {
        self.id.is_nil() || self.chat_id == 0
    }

    /// Firestore document ID.
    pub fn document_id(&self) -> String {
        self.chat_id.to_string()
    }
}
