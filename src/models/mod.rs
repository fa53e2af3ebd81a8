// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod message;
pub mod user;
pub mod weather;

pub use message::{InboundMessage, InboundUpdate, Location, OutboundMessage};
pub use user::{Coordinates, Modification, UserRecord};
pub use weather::{Clouds, Condition, Coord, MainBlock, Sys, WeatherSnapshot, Wind};
