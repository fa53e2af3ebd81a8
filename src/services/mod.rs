// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod answer;
pub mod messaging;
pub mod router;
pub mod scheduler;
pub mod telegram;
pub mod weather;

pub use answer::format_answer;
pub use messaging::ChatSender;
pub use router::MessageRouter;
pub use scheduler::{DispatchReport, NotificationScheduler, SchedulerSettings, SchedulerState};
pub use telegram::{run_update_loop, TelegramSender};
pub use weather::WeatherClient;
