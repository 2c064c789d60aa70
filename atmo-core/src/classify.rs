//! Pure classifiers that turn snapshot fields into display labels.
//!
//! Every function here is total: any input, including NaN, yields a label.

use std::fmt;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR_DEGREES: f64 = 22.5;

/// Wind speed (km/h) above which the icon is `Windy` whatever the sky does.
pub const WINDY_THRESHOLD_KMH: f64 = 15.0;

/// WMO codes reported by the provider and their display text.
///
/// Consumers key presentation off these exact strings.
pub const WEATHER_CODES: [(u16, &str); 28] = [
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

pub const UNKNOWN_WEATHER_CONDITION: &str = "Unknown weather condition";

/// 16-point compass label for a wind direction in degrees.
pub fn classify_wind_direction(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS_POINTS[0];
    }

    let normalized = degrees.rem_euclid(360.0);
    // f64::round rounds half away from zero, so boundaries go to the higher sector.
    let index = (normalized / SECTOR_DEGREES).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Text for a WMO weather code, or [`UNKNOWN_WEATHER_CONDITION`].
pub fn describe_weather_code(code: u16) -> &'static str {
    WEATHER_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| *text)
        .unwrap_or(UNKNOWN_WEATHER_CONDITION)
}

pub fn is_known_weather_code(code: u16) -> bool {
    WEATHER_CODES.iter().any(|(known, _)| *known == code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UvLevel::Low => "Low",
            UvLevel::Moderate => "Moderate",
            UvLevel::High => "High",
            UvLevel::VeryHigh => "Very High",
            UvLevel::Extreme => "Extreme",
        }
    }
}

pub fn classify_uv_index(uv: f64) -> UvLevel {
    if uv <= 2.0 {
        UvLevel::Low
    } else if uv <= 5.0 {
        UvLevel::Moderate
    } else if uv <= 7.0 {
        UvLevel::High
    } else if uv <= 10.0 {
        UvLevel::VeryHigh
    } else {
        UvLevel::Extreme
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
}

impl VisibilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityLevel::Excellent => "Excellent",
            VisibilityLevel::Good => "Good",
            VisibilityLevel::Moderate => "Moderate",
            VisibilityLevel::Poor => "Poor",
            VisibilityLevel::VeryPoor => "Very Poor",
        }
    }
}

pub fn classify_visibility(meters: f64) -> VisibilityLevel {
    if meters >= 10_000.0 {
        VisibilityLevel::Excellent
    } else if meters >= 5_000.0 {
        VisibilityLevel::Good
    } else if meters >= 2_000.0 {
        VisibilityLevel::Moderate
    } else if meters >= 1_000.0 {
        VisibilityLevel::Poor
    } else {
        VisibilityLevel::VeryPoor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureLevel {
    High,
    Normal,
    Low,
}

impl PressureLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureLevel::High => "High",
            PressureLevel::Normal => "Normal",
            PressureLevel::Low => "Low",
        }
    }
}

pub fn classify_pressure(hpa: f64) -> PressureLevel {
    if hpa > 1020.0 {
        PressureLevel::High
    } else if hpa > 1000.0 {
        PressureLevel::Normal
    } else {
        PressureLevel::Low
    }
}

/// Icon family the UI draws for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Windy,
    Clear,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Cloudy,
}

impl IconCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Windy => "windy",
            IconCategory::Clear => "clear",
            IconCategory::Fog => "fog",
            IconCategory::Drizzle => "drizzle",
            IconCategory::Rain => "rain",
            IconCategory::Snow => "snow",
            IconCategory::Thunderstorm => "thunderstorm",
            IconCategory::Cloudy => "cloudy",
        }
    }
}

struct IconRule {
    matches: fn(u16, f64) -> bool,
    category: IconCategory,
}

/// Evaluated top to bottom; the first match wins. Wind must stay first.
const ICON_RULES: [IconRule; 7] = [
    IconRule { matches: |_, wind| wind > WINDY_THRESHOLD_KMH, category: IconCategory::Windy },
    IconRule { matches: |code, _| matches!(code, 0..=3), category: IconCategory::Clear },
    IconRule { matches: |code, _| matches!(code, 45..=48), category: IconCategory::Fog },
    IconRule { matches: |code, _| matches!(code, 51..=57), category: IconCategory::Drizzle },
    IconRule { matches: |code, _| matches!(code, 61..=67 | 80..=82), category: IconCategory::Rain },
    IconRule { matches: |code, _| matches!(code, 71..=77 | 85..=86), category: IconCategory::Snow },
    IconRule {
        matches: |code, _| matches!(code, 95..=99),
        category: IconCategory::Thunderstorm,
    },
];

pub fn classify_icon_category(code: u16, wind_speed_kmh: f64) -> IconCategory {
    ICON_RULES
        .iter()
        .find(|rule| (rule.matches)(code, wind_speed_kmh))
        .map(|rule| rule.category)
        .unwrap_or(IconCategory::Cloudy)
}

/// Emoji glyph for the home summary line.
pub fn weather_emoji(code: u16) -> &'static str {
    match code {
        0 => "☀️",
        1..=3 => "⛅",
        45..=48 => "🌫️",
        51..=57 => "🌦️",
        61..=67 | 80..=82 => "🌧️",
        71..=77 | 85..=86 => "❄️",
        95..=99 => "⛈️",
        _ => "☁️",
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_via_as_str!(UvLevel, VisibilityLevel, PressureLevel, IconCategory);
