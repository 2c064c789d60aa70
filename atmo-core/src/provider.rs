use crate::{Config, WeatherFetchError, WeatherSnapshot, provider::openmeteo::OpenMeteoProvider};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// Source of current-condition snapshots.
///
/// Implementations are stateless: concurrent calls issue independent requests
/// and never share a partially built result.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_snapshot(&self) -> Result<WeatherSnapshot, WeatherFetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::from_config(config)
        .with_context(|| format!("Failed to set up weather provider for {}", config.base_url))?;

    Ok(Box::new(provider))
}

/// Fetch one snapshot for the fixed location using the default configuration.
///
/// No retry and no caching; a failed call leaves the caller's previous snapshot alone.
pub async fn fetch_weather_snapshot() -> Result<WeatherSnapshot, WeatherFetchError> {
    OpenMeteoProvider::from_config(&Config::default())?.fetch_snapshot().await
}
