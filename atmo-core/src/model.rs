use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One immutable point-in-time reading of current conditions.
///
/// Built fresh on every successful fetch; never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature at 2 m, °C.
    pub temperature: f64,
    /// Perceived temperature, °C.
    pub apparent_temperature: f64,
    /// WMO weather code as reported by the provider.
    pub weather_code: u16,
    /// Wind speed at 10 m, km/h.
    pub wind_speed: f64,
    /// Wind direction at 10 m, degrees.
    pub wind_direction: f64,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Precipitation, mm.
    pub precipitation: f64,
    /// Mean sea level pressure, hPa.
    pub pressure: f64,
    /// Visibility, meters.
    pub visibility: f64,
    pub uv_index: f64,
    /// Cloud cover, percent.
    pub cloud_cover: u8,
    /// Dew point, °C.
    pub dew_point: f64,
    /// Observation time exactly as returned by the provider (ISO-8601, local to the location).
    pub timestamp: String,
}

impl WeatherSnapshot {
    /// Parse the provider timestamp for display purposes.
    ///
    /// Open-Meteo returns minute precision (`2024-01-15T12:00`); seconds and
    /// RFC 3339 are accepted too. Returns `None` if nothing matches.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        let s = self.timestamp.as_str();

        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn snapshot_at(timestamp: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 4.2,
            apparent_temperature: 1.0,
            weather_code: 3,
            wind_speed: 10.0,
            wind_direction: 200.0,
            humidity: 80,
            precipitation: 0.0,
            pressure: 1012.0,
            visibility: 24000.0,
            uv_index: 0.5,
            cloud_cover: 90,
            dew_point: -1.5,
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn observed_at_parses_minute_precision() {
        let at = snapshot_at("2024-01-15T12:45").observed_at().expect("must parse");
        assert_eq!(at.year(), 2024);
        assert_eq!(at.day(), 15);
        assert_eq!(at.hour(), 12);
        assert_eq!(at.minute(), 45);
    }

    #[test]
    fn observed_at_accepts_seconds_and_rfc3339() {
        assert!(snapshot_at("2024-01-15T12:45:30").observed_at().is_some());
        assert!(snapshot_at("2024-01-15T12:45:30+01:00").observed_at().is_some());
    }

    #[test]
    fn observed_at_is_none_for_garbage_but_keeps_raw_string() {
        let snap = snapshot_at("yesterday-ish");
        assert!(snap.observed_at().is_none());
        assert_eq!(snap.timestamp, "yesterday-ish");
    }
}
