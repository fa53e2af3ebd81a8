//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.
//! All values are read once at startup; nothing is reconfigurable at runtime.

use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_WEATHER_HOST: &str = "https://api.openweathermap.org/data/2.5/weather?";

/// Longest scheduler tick: one day.
const MAX_TICK_MINUTES: u64 = 24 * 60;

/// Which user store backs the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Firestore (or its emulator).
    Firestore,
    /// Process-local map, lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                name: "STORE_BACKEND",
                value: value.to_string(),
                reason: "expected `firestore` or `memory`".to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token
    pub bot_token: String,
    /// Tracing filter directive, e.g. "info" or "weather_bot=debug"
    pub log_level: String,
    /// Weather provider base URL, already ending ready for query append
    pub weather_host: String,
    /// Weather provider API key
    pub weather_api_key: String,
    /// Which store to use
    pub store_backend: StoreBackend,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Timeout applied to every store operation
    pub store_timeout: Duration,
    /// Hour of day (0-23, local time) of the daily push
    pub notify_hour: u32,
    /// Scheduler tick interval
    pub tick_interval: Duration,
    /// Pause before each user's weather request
    pub user_delay: Duration,
}

impl Config {
    /// Config for tests only: in-memory store, no delays.
    pub fn test_default() -> Self {
        Self {
            bot_token: "123456:test-token".to_string(),
            log_level: "debug".to_string(),
            weather_host: "http://localhost:8081/weather?".to_string(),
            weather_api_key: "test_key".to_string(),
            store_backend: StoreBackend::Memory,
            gcp_project_id: "test-project".to_string(),
            store_timeout: Duration::from_secs(5),
            notify_hour: 15,
            tick_interval: Duration::from_secs(60),
            user_delay: Duration::ZERO,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let notify_hour: u32 = parse_or("NOTIFY_HOUR", 15)?;
        if notify_hour > 23 {
            return Err(ConfigError::Invalid {
                name: "NOTIFY_HOUR",
                value: notify_hour.to_string(),
                reason: "hour must be between 0 and 23".to_string(),
            });
        }

        let tick_minutes: u64 = parse_or("TICK_INTERVAL_MINUTES", 1)?;
        if !(1..=MAX_TICK_MINUTES).contains(&tick_minutes) {
            return Err(ConfigError::Invalid {
                name: "TICK_INTERVAL_MINUTES",
                value: tick_minutes.to_string(),
                reason: format!("interval must be between 1 and {} minutes", MAX_TICK_MINUTES),
            });
        }

        Ok(Self {
            bot_token: env::var("BOT_TOKEN")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("BOT_TOKEN"))?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            weather_host: env::var("WEATHER_HOST")
                .unwrap_or_else(|_| DEFAULT_WEATHER_HOST.to_string()),
            weather_api_key: env::var("WEATHER_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("WEATHER_API_KEY"))?,
            store_backend: parse_or("STORE_BACKEND", StoreBackend::Firestore)?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            store_timeout: Duration::from_secs(parse_or("STORE_TIMEOUT_SECS", 5)?),
            notify_hour,
            tick_interval: Duration::from_secs(tick_minutes * 60),
            user_delay: Duration::from_millis(parse_or("USER_DELAY_MS", 1000)?),
        })
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
