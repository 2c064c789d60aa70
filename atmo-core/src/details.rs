//! Detail cards shown under the current-conditions summary.

use crate::{
    classify::{classify_pressure, classify_uv_index, classify_visibility, classify_wind_direction},
    model::WeatherSnapshot,
    units::{TemperatureUnit, convert_temperature},
};

/// Placeholder subtext while no snapshot is available.
pub const NO_DATA: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDetail {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub suffix: &'static str,
    pub decimals: usize,
    pub subtext: Option<String>,
}

impl WeatherDetail {
    /// `value` with its decimals and unit suffix, e.g. `12.5 km/h`.
    pub fn formatted_value(&self) -> String {
        format!("{:.*}{}", self.decimals, self.value, self.suffix)
    }
}

/// Build the six detail cards, in display order.
///
/// With `None` every value is zero and every subtext reads [`NO_DATA`].
/// Temperatures are shown in `unit`.
pub fn build_weather_details(
    snapshot: Option<&WeatherSnapshot>,
    unit: TemperatureUnit,
) -> Vec<WeatherDetail> {
    let value = |f: fn(&WeatherSnapshot) -> f64| snapshot.map_or(0.0, f);
    let subtext = |f: fn(&WeatherSnapshot) -> String| {
        Some(snapshot.map_or_else(|| NO_DATA.to_string(), f))
    };

    vec![
        WeatherDetail {
            key: "wind",
            label: "Wind",
            value: value(|s| s.wind_speed),
            suffix: " km/h",
            decimals: 1,
            subtext: subtext(|s| classify_wind_direction(s.wind_direction).to_string()),
        },
        WeatherDetail {
            key: "humidity",
            label: "Humidity",
            value: value(|s| f64::from(s.humidity)),
            suffix: "%",
            decimals: 0,
            subtext: None,
        },
        WeatherDetail {
            key: "pressure",
            label: "Pressure",
            value: value(|s| s.pressure),
            suffix: " hPa",
            decimals: 0,
            subtext: subtext(|s| classify_pressure(s.pressure).to_string()),
        },
        WeatherDetail {
            key: "uv",
            label: "UV Index",
            value: value(|s| s.uv_index),
            suffix: "",
            decimals: 0,
            subtext: subtext(|s| classify_uv_index(s.uv_index).to_string()),
        },
        WeatherDetail {
            key: "visibility",
            label: "Visibility",
            value: value(|s| s.visibility / 1000.0),
            suffix: " km",
            decimals: 1,
            subtext: subtext(|s| classify_visibility(s.visibility).to_string()),
        },
        WeatherDetail {
            key: "feelsLike",
            label: "Feels Like",
            value: snapshot.map_or(0.0, |s| convert_temperature(s.apparent_temperature, unit)),
            suffix: unit.symbol(),
            decimals: 0,
            subtext: None,
        },
    ]
}
