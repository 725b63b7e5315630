//! Presentation-time formatting.
//!
//! Temperatures are rounded here and only here, half away from zero
//! (`f64::round`). Conversion functions never round temperatures.

use crate::types::WeatherSnapshot;
use crate::units::{
    convert_distance, convert_precipitation, convert_pressure, convert_temperature,
    convert_wind_speed, UnitPreferences,
};
use serde::Serialize;

const METERS_PER_KM: f64 = 1000.0;

/// Snapshot values rendered in the user's preferred units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    pub temperature: String,
    pub feels_like: String,
    pub wind_speed: String,
    pub pressure: String,
    pub visibility: Option<String>,
    pub humidity: String,
    pub chance_of_rain: String,
    pub daily: Vec<DisplayDay>,
    pub hourly: Vec<DisplayHour>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayDay {
    pub day: String,
    pub icon: String,
    pub description: String,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayHour {
    pub time: String,
    pub icon: String,
    pub temperature: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFormatter {
    prefs: UnitPreferences,
}

impl DisplayFormatter {
    pub fn new(prefs: UnitPreferences) -> Self {
        Self { prefs }
    }

    /// Rounded temperature in the preferred unit, without label
    pub fn temperature_value(&self, value_c: f64) -> f64 {
        // Adding 0.0 folds -0 into 0 so "-0°C" is never shown.
        convert_temperature(value_c, self.prefs.temperature).round() + 0.0
    }

    pub fn temperature(&self, value_c: f64) -> String {
        format!(
            "{}{}",
            self.temperature_value(value_c),
            self.prefs.temperature.symbol()
        )
    }

    pub fn wind_speed(&self, value_mps: f64) -> String {
        format!(
            "{} {}",
            convert_wind_speed(value_mps, self.prefs.wind_speed),
            self.prefs.wind_speed.symbol()
        )
    }

    pub fn pressure(&self, value_hpa: f64) -> String {
        format!(
            "{} {}",
            convert_pressure(value_hpa, self.prefs.pressure),
            self.prefs.pressure.symbol()
        )
    }

    /// Visibility arrives in meters; distance conversion expects kilometers.
    pub fn visibility(&self, value_m: f64) -> String {
        let value = convert_distance(value_m / METERS_PER_KM, self.prefs.distance);
        format!("{:.1} {}", value, self.prefs.distance.symbol())
    }

    pub fn precipitation(&self, value_mm: f64) -> String {
        let value = convert_precipitation(value_mm, self.prefs.precipitation);
        format!("{:.2} {}", value, self.prefs.precipitation.symbol())
    }

    /// Render every displayed value of the snapshot. The snapshot is not modified.
    pub fn convert_snapshot(&self, snapshot: &WeatherSnapshot) -> DisplaySnapshot {
        let current = &snapshot.current;
        DisplaySnapshot {
            temperature: self.temperature(current.temperature_c),
            feels_like: self.temperature(current.feels_like_c),
            wind_speed: self.wind_speed(current.wind_speed_mps),
            pressure: self.pressure(current.pressure_hpa),
            visibility: current.visibility_m.map(|v| self.visibility(v)),
            humidity: format!("{}%", current.humidity_pct.round()),
            chance_of_rain: format!("{}%", current.chance_of_rain_pct.round()),
            daily: snapshot
                .daily
                .iter()
                .map(|d| DisplayDay {
                    day: d.day.clone(),
                    icon: d.icon.clone(),
                    description: d.description.clone(),
                    high: self.temperature(d.temp_high_c),
                    low: self.temperature(d.temp_low_c),
                })
                .collect(),
            hourly: snapshot
                .hourly
                .iter()
                .map(|h| DisplayHour {
                    time: h.time.clone(),
                    icon: h.icon.clone(),
                    temperature: self.temperature(h.temperature_c),
                })
                .collect(),
        }
    }
}
