// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily weather push.
//!
//! A recurring timer wakes the scheduler; when the wall-clock hour equals the
//! target hour it walks every registered user:
//! 1. Wait the inter-user delay (provider rate limit)
//! 2. Fetch current weather for the user's coordinates
//! 3. Format and send the reply
//! 4. Record the update on the user document
//!
//! Users are processed one at a time. A failure for one user is logged and
//! the batch moves on to the next user.

use crate::config::Config;
use crate::db::UserStore;
use crate::error::AppError;
use crate::models::UserRecord;
use crate::services::answer::format_answer;
use crate::services::messaging::ChatSender;
use crate::services::weather::WeatherClient;
use crate::time_utils::format_hour_minute;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Timing knobs, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerSettings {
    /// Hour of day (0-23) of the push
    pub target_hour: u32,
    /// Period of the recurring timer
    pub tick_interval: Duration,
    /// Pause before each user's weather request
    pub user_delay: Duration,
    /// Bound on every store call
    pub store_timeout: Duration,
}

impl SchedulerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            target_hour: config.notify_hour,
            tick_interval: config.tick_interval,
            user_delay: config.user_delay,
            store_timeout: config.store_timeout,
        }
    }
}

/// Where the scheduler is in its tick cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next tick
    Idle,
    /// Tick received, checking the hour
    Evaluating,
    /// Walking the user list
    Dispatching,
}

/// Outcome of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

pub struct NotificationScheduler {
    store: Arc<dyn UserStore>,
    sender: Arc<dyn ChatSender>,
    weather: WeatherClient,
    settings: SchedulerSettings,
    state: SchedulerState,
    /// Date of the last completed batch; one push per day.
    last_batch: Option<NaiveDate>,
}

impl NotificationScheduler {
    pub fn new(
        store: Arc<dyn UserStore>,
        sender: Arc<dyn ChatSender>,
        weather: WeatherClient,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            store,
            sender,
            weather,
            settings,
            state: SchedulerState::Idle,
            last_batch: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Tick until `cancel` fires.
    ///
    /// A failed tick is logged and the loop keeps going; only cancellation
    /// ends it. Cancellation also interrupts a batch in progress.
    pub async fn run(mut self, cancel: CancellationToken) {
        let period = self.settings.tick_interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            target_hour = self.settings.target_hour,
            interval_secs = period.as_secs(),
            "Scheduler started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let now = Local::now();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.handle_tick(&now) => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, code = e.code(), "Scheduled push aborted");
                    }
                }
            }
        }

        self.state = SchedulerState::Idle;
        tracing::info!("Scheduler stopped");
    }

    /// Process a single tick fired at `at`.
    ///
    /// Returns `Ok(None)` when the tick is outside the target hour or today's
    /// batch already ran. An error means the user list could not be loaded;
    /// the next tick in the target hour tries again.
    pub async fn handle_tick<Tz>(
        &mut self,
        at: &DateTime<Tz>,
    ) -> Result<Option<DispatchReport>, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.state = SchedulerState::Evaluating;

        if at.hour() != self.settings.target_hour {
            self.state = SchedulerState::Idle;
            return Ok(None);
        }

        let today = at.date_naive();
        if self.last_batch == Some(today) {
            tracing::debug!(%today, "Weather already pushed today");
            self.state = SchedulerState::Idle;
            return Ok(None);
        }

        self.state = SchedulerState::Dispatching;
        let result = self.push_scheduled_weather(at).await;
        self.state = SchedulerState::Idle;

        let report = result?;
        self.last_batch = Some(today);
        Ok(Some(report))
    }

    async fn push_scheduled_weather<Tz>(&self, at: &DateTime<Tz>) -> Result<DispatchReport, AppError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let users = self.with_timeout("list users", self.store.list_all()).await?;

        let mut report = DispatchReport {
            total: users.len(),
            ..Default::default()
        };

        for mut user in users {
            tokio::time::sleep(self.settings.user_delay).await;

            match self.notify_user(&mut user).await {
                Ok(()) => report.sent += 1,
                Err(e) if e.is_store_error() => {
                    // The message may already be out; only the bookkeeping failed.
                    report.failed += 1;
                    tracing::error!(
                        error = %e,
                        code = e.code(),
                        chat_id = user.chat_id,
                        "Failed to record weather push"
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        error = %e,
                        code = e.code(),
                        chat_id = user.chat_id,
                        "Failed to push weather to user"
                    );
                }
            }
        }

        tracing::info!(
            at = %format_hour_minute(at),
            total = report.total,
            sent = report.sent,
            failed = report.failed,
            "Executed scheduled weather push"
        );

        Ok(report)
    }

    async fn notify_user(&self, user: &mut UserRecord) -> Result<(), AppError> {
        let coords = user.coordinates;
        let snapshot = self.weather.fetch(coords.latitude, coords.longitude).await?;
        tracing::debug!(
            chat_id = user.chat_id,
            location = %snapshot.name,
            condition = snapshot.condition_description().unwrap_or_default(),
            observed_at = ?snapshot.observed_at(),
            "Weather received"
        );

        let reply = format_answer(&snapshot)?;

        tracing::info!(chat_id = user.chat_id, reply = %reply, "Sending weather to user");
        self.sender.send_text(user.chat_id, &reply).await?;

        user.touch();
        self.with_timeout("record update", self.store.record_update(user))
            .await
    }

    async fn with_timeout<T, F>(&self, what: &str, operation: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let limit = self.settings.store_timeout;
        tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| AppError::Timeout(format!("{} exceeded {:?}", what, limit)))?
    }
}
