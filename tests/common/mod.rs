// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use weather_bot::db::{FirestoreDb, MemoryUserStore, UserStore};
use weather_bot::error::AppError;
use weather_bot::models::UserRecord;
use weather_bot::services::ChatSender;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Shared, ordered log of side effects ("send:<chat>", "update:<chat>", ...).
pub type EventLog = Arc<Mutex<Vec<String>>>;

#[allow(dead_code)]
pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Chat sender that records instead of talking to Telegram.
#[allow(dead_code)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(i64, String)>>,
    events: EventLog,
    fail_for: Option<i64>,
}

#[allow(dead_code)]
impl RecordingSender {
    pub fn new(events: EventLog) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            events,
            fail_for: None,
        }
    }

    /// Sends to `chat_id` fail with a dispatch error.
    pub fn failing_for(events: EventLog, chat_id: i64) -> Self {
        Self {
            fail_for: Some(chat_id),
            ..Self::new(events)
        }
    }

    pub fn messages(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatSender for RecordingSender {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        if self.fail_for == Some(chat_id) {
            return Err(AppError::Dispatch(format!("chat {} blocked the bot", chat_id)));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        self.events
            .lock()
            .unwrap()
            .push(format!("send:{}", chat_id));
        Ok(())
    }
}

/// Memory store that counts calls and can be told to fail.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryUserStore,
    pub saves: AtomicUsize,
    pub lists: AtomicUsize,
    pub updates: AtomicUsize,
    pub fail_all: bool,
    pub fail_updates: bool,
    events: Option<EventLog>,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: EventLog) -> Self {
        Self {
            events: Some(events),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Reads and saves work; every `record_update` fails.
    pub fn failing_updates(events: EventLog) -> Self {
        Self {
            fail_updates: true,
            ..Self::with_events(events)
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Seed a user directly.
    pub async fn seed(&self, chat_id: i64, latitude: f64, longitude: f64) -> UserRecord {
        let user = UserRecord::create(chat_id, latitude, longitude);
        self.inner.save_if_absent(&user).await.unwrap();
        user
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn save_if_absent(&self, user: &UserRecord) -> Result<(), AppError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(AppError::Lookup("connection refused".to_string()));
        }
        self.inner.save_if_absent(user).await
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, AppError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(AppError::Lookup("connection refused".to_string()));
        }
        self.inner.list_all().await
    }

    async fn record_update(&self, user: &UserRecord) -> Result<(), AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if let Some(events) = &self.events {
            events
                .lock()
                .unwrap()
                .push(format!("update:{}", user.chat_id));
        }
        if self.fail_all || self.fail_updates {
            return Err(AppError::Update("connection refused".to_string()));
        }
        self.inner.record_update(user).await
    }
}

/// Store whose registration never completes.
#[allow(dead_code)]
pub struct StalledStore;

#[async_trait]
impl UserStore for StalledStore {
    async fn save_if_absent(&self, _user: &UserRecord) -> Result<(), AppError> {
        std::future::pending::<()>().await;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, AppError> {
        std::future::pending::<()>().await;
        Ok(Vec::new())
    }

    async fn record_update(&self, _user: &UserRecord) -> Result<(), AppError> {
        Ok(())
    }
}

/// Provider payload with the given temperatures.
#[allow(dead_code)]
pub fn weather_json(temp: f64, temp_max: f64, temp_min: f64) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 21.0175, "lat": 52.237},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "base": "stations",
        "main": {
            "temp": temp,
            "feels_like": temp,
            "temp_min": temp_min,
            "temp_max": temp_max,
            "pressure": 1015,
            "humidity": 40
        },
        "visibility": 10000,
        "wind": {"speed": 3.1, "deg": 250, "gust": 5.2},
        "clouds": {"all": 0},
        "dt": 1_780_000_000,
        "sys": {"type": 2, "id": 2_032_856, "country": "PL", "sunrise": 1_779_980_000, "sunset": 1_780_040_000},
        "timezone": 7200,
        "id": 756_135,
        "name": "Warsaw",
        "cod": 200
    })
}
