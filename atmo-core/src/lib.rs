//! Core library for the Atmo weather app.
//!
//! This crate defines:
//! - The normalized [`WeatherSnapshot`] and its fetch error
//! - The Open-Meteo provider behind the [`WeatherProvider`] trait
//! - Pure classifiers (compass, UV, visibility, pressure, condition text, icon)
//! - Detail cards built from a snapshot, with °C/°F display
//! - Configuration stored on disk
//!
//! It is used by `atmo-cli`, but any front end can hold the snapshot in its own view state.

pub mod classify;
pub mod config;
pub mod details;
pub mod error;
pub mod model;
pub mod provider;
pub mod units;

pub use classify::{
    IconCategory, PressureLevel, UvLevel, VisibilityLevel, classify_icon_category,
    classify_pressure, classify_uv_index, classify_visibility, classify_wind_direction,
    describe_weather_code, weather_emoji,
};
pub use config::Config;
pub use details::{WeatherDetail, build_weather_details};
pub use error::WeatherFetchError;
pub use model::WeatherSnapshot;
pub use units::{TemperatureUnit, convert_temperature};
pub use provider::{
    WeatherProvider, fetch_weather_snapshot, openmeteo::OpenMeteoProvider, provider_from_config,
};
