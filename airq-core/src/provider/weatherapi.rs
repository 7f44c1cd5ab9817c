use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{AirQualityError, Result},
    model::AirQualityReading,
};

use super::AirQualityProvider;

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// weatherapi.com answers well within this on a healthy link; anything
/// slower is treated as a transport failure instead of hanging.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the weatherapi.com `current.json` and `forecast.json`
/// endpoints, queried with `aqi=yes` so responses carry PM2.5 data.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|source| AirQualityError::Transport { endpoint: "client", source })?;

        Ok(Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http })
    }

    /// Point the client at a different host. Not an end-user option.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_body(
        &self,
        endpoint: &'static str,
        extra: &[(&str, String)],
        location: &str,
    ) -> Result<String> {
        let url = format!("{}/{endpoint}", self.base_url);

        debug!(endpoint, location, "requesting weatherapi.com");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", location), ("aqi", "yes")])
            .query(extra)
            .send()
            .await
            .map_err(|source| AirQualityError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| AirQualityError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(AirQualityError::Upstream {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct WaAirQuality {
    pm2_5: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    air_quality: Option<WaAirQuality>,
}

// `current` itself is optional: a 200 body without it is "no data", not
// a decode failure.
#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    current: Option<WaCurrent>,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    air_quality: Option<WaAirQuality>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    #[serde(default)]
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize, Default)]
struct WaForecast {
    #[serde(default)]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    #[serde(default)]
    forecast: WaForecast,
}

impl WaCurrentResponse {
    fn pm2_5(self) -> Option<f64> {
        self.current?.air_quality?.pm2_5
    }
}

impl WaForecastResponse {
    /// First hourly slot of the first forecast day.
    fn pm2_5(self) -> Option<f64> {
        self.forecast
            .forecastday
            .into_iter()
            .next()?
            .hour
            .into_iter()
            .next()?
            .air_quality?
            .pm2_5
    }
}

#[async_trait]
impl AirQualityProvider for WeatherApiProvider {
    async fn fetch_current(&self, location: &str) -> Result<Option<AirQualityReading>> {
        let endpoint = "current.json";
        let body = self.get_body(endpoint, &[], location).await?;

        let parsed: WaCurrentResponse = serde_json::from_str(&body)
            .map_err(|source| AirQualityError::Decode { endpoint, source })?;

        Ok(parsed.pm2_5().map(|pm2_5| AirQualityReading { pm2_5 }))
    }

    async fn fetch_forecast(
        &self,
        location: &str,
        when: DateTime<Utc>,
    ) -> Result<Option<AirQualityReading>> {
        let endpoint = "forecast.json";
        let extra = [("unixdt", when.timestamp().to_string())];
        let body = self.get_body(endpoint, &extra, location).await?;

        let parsed: WaForecastResponse = serde_json::from_str(&body)
            .map_err(|source| AirQualityError::Decode { endpoint, source })?;

        Ok(parsed.pm2_5().map(|pm2_5| AirQualityReading { pm2_5 }))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Upstream error bodies echo location names, so byte 200 can land
    // inside a multi-byte character; back up to the nearest boundary.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_payload_with_air_quality() {
        let body = r#"{"current":{"air_quality":{"pm2_5":8.5,"co":230.3}}}"#;
        let parsed: WaCurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.pm2_5(), Some(8.5));
    }

    #[test]
    fn current_payload_without_air_quality_is_none() {
        let body = r#"{"current":{"temp_c":21.0}}"#;
        let parsed: WaCurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.pm2_5(), None);
    }

    #[test]
    fn current_payload_without_current_key_is_none() {
        let body = r#"{"location":{"name":"Paris"}}"#;
        let parsed: WaCurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.pm2_5(), None);
    }

    #[test]
    fn forecast_payload_reads_first_day_first_hour() {
        let body = r#"{
            "forecast": {
                "forecastday": [
                    {"hour": [
                        {"air_quality": {"pm2_5": 42.1}},
                        {"air_quality": {"pm2_5": 99.0}}
                    ]},
                    {"hour": [{"air_quality": {"pm2_5": 7.0}}]}
                ]
            }
        }"#;
        let parsed: WaForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.pm2_5(), Some(42.1));
    }

    #[test]
    fn forecast_payload_with_empty_hours_is_none() {
        let body = r#"{"forecast":{"forecastday":[{"hour":[]}]}}"#;
        let parsed: WaForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.pm2_5(), None);
    }

    #[test]
    fn forecast_payload_without_forecast_key_is_none() {
        let parsed: WaForecastResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.pm2_5(), None);
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // 'é' is two bytes and straddles the 200-byte cutoff.
        let body = format!("{}é and more", "x".repeat(199));
        let truncated = truncate_body(&body);

        assert_eq!(truncated, format!("{}...", "x".repeat(199)));

        // A cutoff landing exactly on a boundary keeps the character.
        let body = format!("{}é tail", "x".repeat(198));
        let truncated = truncate_body(&body);
        assert_eq!(truncated, format!("{}é...", "x".repeat(198)));
    }
}
