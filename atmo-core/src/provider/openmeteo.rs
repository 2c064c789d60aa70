use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    classify::is_known_weather_code, config::Config, error::WeatherFetchError,
    model::WeatherSnapshot,
};

use super::WeatherProvider;

/// Fixed location: Berlin.
pub const LATITUDE: f64 = 52.52;
pub const LONGITUDE: f64 = 13.41;

/// Current-condition fields requested from Open-Meteo, in request order.
pub const CURRENT_FIELDS: &str = "temperature_2m,weathercode,windspeed_10m,winddirection_10m,\
relativehumidity_2m,precipitation,pressure_msl,visibility,uv_index,cloudcover,dewpoint_2m,\
apparent_temperature";

/// Open-Meteo forecast endpoint, current conditions only. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    /// `timeout` is applied as-is; use [`OpenMeteoProvider::from_config`] for the clamped bound.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherFetchError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            WeatherFetchError::Network(format!("failed to initialise HTTP client: {e}"))
        })?;

        Ok(Self { base_url: base_url.into(), http })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherFetchError> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url.trim_end_matches('/'))
    }

    #[instrument(skip(self), fields(lat = %LATITUDE, lon = %LONGITUDE))]
    async fn fetch_current(&self) -> Result<WeatherSnapshot, WeatherFetchError> {
        let url = self.forecast_url();
        debug!(url = %url, "Fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", LATITUDE.to_string()),
                ("longitude", LONGITUDE.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(WeatherFetchError::from_transport)?;

        let status = res.status();
        debug!(status = %status, "Open-Meteo responded");

        if !status.is_success() {
            // The status is the failure; a body that can't be read is just left out.
            let body = res.text().await.unwrap_or_default();
            return Err(WeatherFetchError::Http {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = res.text().await.map_err(WeatherFetchError::from_transport)?;

        parse_current(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    weathercode: u16,
    windspeed_10m: f64,
    winddirection_10m: f64,
    relativehumidity_2m: u8,
    precipitation: f64,
    pressure_msl: f64,
    visibility: f64,
    uv_index: f64,
    cloudcover: u8,
    dewpoint_2m: f64,
    apparent_temperature: f64,
    time: String,
}

impl OmCurrent {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherFetchError> {
        let non_negative = [
            ("windspeed_10m", self.windspeed_10m),
            ("winddirection_10m", self.winddirection_10m),
            ("precipitation", self.precipitation),
            ("pressure_msl", self.pressure_msl),
            ("visibility", self.visibility),
            ("uv_index", self.uv_index),
        ];

        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(WeatherFetchError::Parse(format!(
                "field `{name}` must not be negative, got {value}"
            )));
        }

        if !is_known_weather_code(self.weathercode) {
            warn!(code = self.weathercode, "Provider returned an unknown weather code");
        }

        Ok(WeatherSnapshot {
            temperature: self.temperature_2m,
            apparent_temperature: self.apparent_temperature,
            weather_code: self.weathercode,
            wind_speed: self.windspeed_10m,
            wind_direction: self.winddirection_10m,
            humidity: self.relativehumidity_2m,
            precipitation: self.precipitation,
            pressure: self.pressure_msl,
            visibility: self.visibility,
            uv_index: self.uv_index,
            cloud_cover: self.cloudcover,
            dew_point: self.dewpoint_2m,
            timestamp: self.time,
        })
    }
}

/// Map an Open-Meteo response body onto a snapshot. All or nothing.
fn parse_current(body: &str) -> Result<WeatherSnapshot, WeatherFetchError> {
    let parsed: OmResponse =
        serde_json::from_str(body).map_err(|e| WeatherFetchError::Parse(e.to_string()))?;

    parsed.current.into_snapshot()
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch_snapshot(&self) -> Result<WeatherSnapshot, WeatherFetchError> {
        self.fetch_current().await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
