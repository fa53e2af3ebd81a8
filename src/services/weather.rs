// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather provider client.
//!
//! Talks to an OpenWeather-style current-weather endpoint. The configured
//! host is used verbatim and the query string is appended to it, so the host
//! must already end in `?` (or `&`).

use crate::config::Config;
use crate::error::AppError;
use crate::models::WeatherSnapshot;
use reqwest::StatusCode;

/// Weather API client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    host: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a client on top of a shared HTTP client.
    pub fn new(http: reqwest::Client, host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            host: host.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, &config.weather_host, &config.weather_api_key)
    }

    /// Full request URL for a coordinate pair.
    pub fn request_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}lat={}&lon={}&appid={}&units=metric",
            self.host, latitude, longitude, self.api_key
        )
    }

    /// Fetch current weather for a coordinate pair.
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, AppError> {
        tracing::debug!(latitude, longitude, "Requesting current weather");

        let url = self.request_url(latitude, longitude);
        let result = self.get_snapshot(&url).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, latitude, longitude, "Weather request failed");
        }
        result
    }

    /// Issue the GET and decode the body.
    async fn get_snapshot(&self, url: &str) -> Result<WeatherSnapshot, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Gateway(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Weather provider returned an error status");
            return Err(AppError::Gateway(body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| AppError::Decode(e.to_string()))
    }
}
