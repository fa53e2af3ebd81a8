// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current-weather payload returned by the provider.
//!
//! Nested blocks are optional: the provider omits some of them for remote
//! locations, so callers must check before use.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One point-in-time observation for a coordinate pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    pub coord: Option<Coord>,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: Option<MainBlock>,
    pub visibility: i64,
    pub wind: Option<Wind>,
    pub clouds: Option<Clouds>,
    /// Observation time (Unix seconds)
    pub dt: i64,
    pub sys: Option<Sys>,
    /// Shift from UTC in seconds
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

impl WeatherSnapshot {
    /// Description of the first reported condition, e.g. "overcast clouds".
    pub fn condition_description(&self) -> Option<&str> {
        self.weather.first().map(|c| c.description.as_str())
    }

    /// Observation time, if the provider sent a valid one.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        if self.dt == 0 {
            return None;
        }
        DateTime::from_timestamp(self.dt, 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Primary measurement block, temperatures in Celsius (metric units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: i64,
    pub gust: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}
