// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather-Bot server
//!
//! Runs the Telegram update loop and the daily weather scheduler side by
//! side until Ctrl-C.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_bot::{
    config::Config,
    error::AppError,
    services::{
        run_update_loop, ChatSender, MessageRouter, NotificationScheduler, SchedulerSettings,
        TelegramSender, WeatherClient,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = Config::from_env().map_err(AppError::from)?;

    // Initialize structured JSON logging
    init_logging(&config.log_level)?;
    tracing::info!(
        notify_hour = config.notify_hour,
        store = ?config.store_backend,
        "Starting Weather-Bot"
    );

    let store = weather_bot::open_store(&config).await?;

    let telegram = TelegramSender::connect(&config.bot_token).await?;
    let bot = telegram.bot();
    let sender: Arc<dyn ChatSender> = Arc::new(telegram);

    let weather = WeatherClient::from_config(reqwest::Client::new(), &config);

    let cancel = CancellationToken::new();

    let scheduler = NotificationScheduler::new(
        store.clone(),
        sender.clone(),
        weather,
        SchedulerSettings::from_config(&config),
    );
    let scheduler_task = tokio::spawn(scheduler.run(cancel.clone()));

    let router = MessageRouter::new(store, config.store_timeout);
    let updates_task = tokio::spawn(run_update_loop(bot, router, sender, cancel.clone()));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    cancel.cancel();

    let (scheduler_result, updates_result) = tokio::join!(scheduler_task, updates_task);
    scheduler_result?;
    updates_result?;

    tracing::info!("Weather-Bot stopped");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging(level: &str) -> Result<(), AppError> {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .map_err(|e| AppError::Config(format!("invalid LOG_LEVEL {:?}: {}", level, e)))?;

    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to install logger: {}", e)))
}
