// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turns a weather snapshot into the text pushed to users.

use crate::error::AppError;
use crate::models::WeatherSnapshot;

/// Render the temperature line for a snapshot.
pub fn format_answer(snapshot: &WeatherSnapshot) -> Result<String, AppError> {
    let main = snapshot
        .main
        .as_ref()
        .ok_or_else(|| AppError::Mapping("weather response has no main block".to_string()))?;

    Ok(format!(
        "Temperature Middle:{:.2}°C Max:{:.2}°C Min:{:.2}°C",
        main.temp, main.temp_max, main.temp_min
    ))
}
