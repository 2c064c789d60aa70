//! Human-friendly text output.

use atmo_core::{
    TemperatureUnit, WeatherSnapshot, build_weather_details, classify::WEATHER_CODES,
    classify_icon_category, convert_temperature, describe_weather_code, weather_emoji,
};

use crate::state::ViewState;

/// Summary line plus the detail cards.
pub fn render_snapshot(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {:.0}{}  {} ({})\n",
        weather_emoji(snapshot.weather_code),
        convert_temperature(snapshot.temperature, unit),
        unit.symbol(),
        describe_weather_code(snapshot.weather_code),
        classify_icon_category(snapshot.weather_code, snapshot.wind_speed),
    ));

    let observed = snapshot
        .observed_at()
        .map(|at| at.format("%a %d %b %H:%M").to_string())
        .unwrap_or_else(|| snapshot.timestamp.clone());
    out.push_str(&format!("Observed {observed}\n"));
    out.push_str(&format!(
        "Cloud cover {}%  Precipitation {:.1} mm  Dew point {:.0}{}\n\n",
        snapshot.cloud_cover,
        snapshot.precipitation,
        convert_temperature(snapshot.dew_point, unit),
        unit.symbol(),
    ));

    for detail in build_weather_details(Some(snapshot), unit) {
        out.push_str(&format!("  {:<11} {:>10}", detail.label, detail.formatted_value()));
        if let Some(sub) = &detail.subtext {
            out.push_str(&format!("  {sub}"));
        }
        out.push('\n');
    }

    out
}

pub fn render_state(state: &ViewState, unit: TemperatureUnit) -> String {
    let mut out = match state.snapshot() {
        Some(snapshot) => render_snapshot(snapshot, unit),
        None if state.error().is_none() => "Loading weather...\n".to_string(),
        None => String::new(),
    };

    if let Some(message) = state.error() {
        out.push_str(&format!("Weather Error: {message}\n"));
        if state.snapshot().is_some() {
            out.push_str("(showing last known conditions)\n");
        }
    }

    out
}

pub fn render_code_table() -> String {
    WEATHER_CODES
        .iter()
        .map(|(code, text)| format!("{code:>3}  {}  {text}\n", weather_emoji(*code)))
        .collect()
}
