//! Ingestion boundary for weather snapshots.
//!
//! Snapshots arrive as JSON from whatever fetch layer normalised the provider
//! response. They are parsed and validated here, once, so the advisory and
//! display layers can rely on a well-typed metric snapshot.

use crate::types::{
    CurrentConditions, DailyForecast, HourlyForecast, WeatherSnapshot, MAX_DAILY_ENTRIES,
    MAX_HOURLY_ENTRIES,
};
use serde::Deserialize;

/// Snapshot ingestion errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of a validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    current: Option<CurrentConditions>,
    #[serde(default)]
    daily: Option<Vec<DailyForecast>>,
    #[serde(default)]
    hourly: Option<RawHourly>,
}

/// Hourly forecast as delivered: parallel arrays.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_c: Vec<f64>,
    #[serde(default)]
    icon: Vec<String>,
}

impl RawHourly {
    fn into_entries(self) -> Result<Vec<HourlyForecast>, SnapshotError> {
        let len = self.time.len();
        if self.temperature_c.len() != len || self.icon.len() != len {
            return Err(SnapshotError::Invalid(format!(
                "hourly arrays differ in length (time={}, temperatureC={}, icon={})",
                len,
                self.temperature_c.len(),
                self.icon.len()
            )));
        }

        Ok(self
            .time
            .into_iter()
            .zip(self.temperature_c)
            .zip(self.icon)
            .map(|((time, temperature_c), icon)| HourlyForecast {
                time,
                temperature_c,
                icon,
            })
            .collect())
    }
}

/// Parse and validate a snapshot document.
///
/// A document without a `current` section is malformed but not an error:
/// it yields `Ok(None)` so callers fall back to a neutral advisory.
///
/// # Errors
/// Returns [`SnapshotError::Parse`] for malformed JSON or missing fields in
/// `current`, and [`SnapshotError::Invalid`] when validation finds errors.
pub fn parse_snapshot(json: &str) -> Result<Option<WeatherSnapshot>, SnapshotError> {
    let raw: RawSnapshot = serde_json::from_str(json)?;

    let Some(current) = raw.current else {
        tracing::warn!("Snapshot has no current conditions; treating as empty");
        return Ok(None);
    };

    let hourly = match raw.hourly {
        Some(hourly) => hourly.into_entries()?,
        None => Vec::new(),
    };

    let snapshot = WeatherSnapshot {
        current,
        daily: raw.daily.unwrap_or_default(),
        hourly,
    };

    let validation = validate(&snapshot);
    if !validation.is_valid() {
        return Err(SnapshotError::Invalid(validation.error_summary()));
    }
    for warning in &validation.warnings {
        tracing::warn!("Snapshot warning: {}", warning);
    }

    tracing::debug!(
        "Ingested snapshot: {} daily, {} hourly entries",
        snapshot.daily.len(),
        snapshot.hourly.len()
    );
    Ok(Some(snapshot))
}

/// Validate value ranges of an already-typed snapshot.
pub fn validate(snapshot: &WeatherSnapshot) -> ValidationResult {
    let mut result = ValidationResult::default();
    let current = &snapshot.current;

    for (field, value) in [
        ("current.temperatureC", current.temperature_c),
        ("current.feelsLikeC", current.feels_like_c),
        ("current.uvIndex", current.uv_index),
        ("current.chanceOfRainPct", current.chance_of_rain_pct),
        ("current.windSpeedMps", current.wind_speed_mps),
        ("current.humidityPct", current.humidity_pct),
        ("current.pressureHpa", current.pressure_hpa),
    ] {
        if !value.is_finite() {
            result.add_error(field, "Value must be a finite number");
        }
    }

    check_percent(&mut result, "current.chanceOfRainPct", current.chance_of_rain_pct);
    check_percent(&mut result, "current.humidityPct", current.humidity_pct);
    check_non_negative(&mut result, "current.uvIndex", current.uv_index);
    check_non_negative(&mut result, "current.windSpeedMps", current.wind_speed_mps);

    if current.pressure_hpa <= 0.0 {
        result.add_error("current.pressureHpa", "Pressure must be positive");
    }

    if let Some(visibility) = current.visibility_m {
        if !visibility.is_finite() {
            result.add_error("current.visibilityM", "Value must be a finite number");
        }
        check_non_negative(&mut result, "current.visibilityM", visibility);
    }

    if current.sunrise >= current.sunset {
        result.add_warning("current.sunriseUnix", "Sunrise is not before sunset");
    }

    if snapshot.daily.len() > MAX_DAILY_ENTRIES {
        result.add_error(
            "daily",
            format!(
                "At most {} daily entries allowed, got {}",
                MAX_DAILY_ENTRIES,
                snapshot.daily.len()
            ),
        );
    }
    for (i, day) in snapshot.daily.iter().enumerate() {
        if !day.temp_high_c.is_finite() || !day.temp_low_c.is_finite() {
            result.add_error(format!("daily[{i}]"), "Temperatures must be finite numbers");
        } else if day.temp_low_c > day.temp_high_c {
            result.add_warning(format!("daily[{i}]"), "Low temperature exceeds high");
        }
    }

    if snapshot.hourly.len() > MAX_HOURLY_ENTRIES {
        result.add_error(
            "hourly",
            format!(
                "At most {} hourly entries allowed, got {}",
                MAX_HOURLY_ENTRIES,
                snapshot.hourly.len()
            ),
        );
    }
    for (i, hour) in snapshot.hourly.iter().enumerate() {
        if !hour.temperature_c.is_finite() {
            result.add_error(format!("hourly[{i}]"), "Temperature must be a finite number");
        }
    }

    result
}

fn check_percent(result: &mut ValidationResult, field: &str, value: f64) {
    if !(0.0..=100.0).contains(&value) {
        result.add_error(field, format!("Percentage out of range 0-100: {value}"));
    }
}

fn check_non_negative(result: &mut ValidationResult, field: &str, value: f64) {
    if value < 0.0 {
        result.add_error(field, format!("Value must not be negative: {value}"));
    }
}
