use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Current conditions in metric base units (Celsius, m/s, hPa, meters, percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub uv_index: f64,
    pub chance_of_rain_pct: f64,
    pub wind_speed_mps: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    /// Some providers omit visibility entirely.
    #[serde(default)]
    pub visibility_m: Option<f64>,
    pub description: String,
    #[serde(rename = "sunriseUnix", with = "chrono::serde::ts_seconds")]
    pub sunrise: DateTime<Utc>,
    #[serde(rename = "sunsetUnix", with = "chrono::serde::ts_seconds")]
    pub sunset: DateTime<Utc>,
}

impl CurrentConditions {
    /// Case-insensitive substring match against the provider description.
    pub fn mentions(&self, keyword: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

/// One day of the short daily forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub day: String,
    pub icon: String,
    pub description: String,
    pub temp_high_c: f64,
    pub temp_low_c: f64,
}

/// One subsampled hourly forecast point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    pub time: String,
    pub temperature_c: f64,
    pub icon: String,
}

/// Fully-populated metric weather reading plus short forecasts.
///
/// Display units never leak into this structure; conversion happens at
/// presentation time and never mutates the snapshot.
///
/// Snapshots are only built from JSON through
/// [`parse_snapshot`](crate::ingest::parse_snapshot); serializing one yields
/// a document that parses back to the same value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    /// Chronological, at most [`MAX_DAILY_ENTRIES`] entries.
    pub daily: Vec<DailyForecast>,
    /// At most [`MAX_HOURLY_ENTRIES`] entries.
    #[serde(serialize_with = "serialize_hourly")]
    pub hourly: Vec<HourlyForecast>,
}

/// Hourly entries go out as parallel arrays, the delivered shape.
fn serialize_hourly<S: Serializer>(
    entries: &[HourlyForecast],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Columns<'a> {
        time: Vec<&'a str>,
        temperature_c: Vec<f64>,
        icon: Vec<&'a str>,
    }

    Columns {
        time: entries.iter().map(|h| h.time.as_str()).collect(),
        temperature_c: entries.iter().map(|h| h.temperature_c).collect(),
        icon: entries.iter().map(|h| h.icon.as_str()).collect(),
    }
    .serialize(serializer)
}

pub const MAX_DAILY_ENTRIES: usize = 7;
pub const MAX_HOURLY_ENTRIES: usize = 3;

impl WeatherSnapshot {
    pub fn new(current: CurrentConditions) -> Self {
        Self {
            current,
            daily: Vec::new(),
            hourly: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn conditions(description: &str) -> CurrentConditions {
        CurrentConditions {
            temperature_c: 20.0,
            feels_like_c: 19.0,
            uv_index: 3.0,
            chance_of_rain_pct: 10.0,
            wind_speed_mps: 4.0,
            humidity_pct: 50.0,
            pressure_hpa: 1013.0,
            visibility_m: Some(10_000.0),
            description: description.to_string(),
            sunrise: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            sunset: Utc.timestamp_opt(1_700_040_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        let current = conditions("Thunderstorm with heavy rain");
        assert!(current.mentions("thunderstorm"));
        assert!(current.mentions("RAIN"));
        assert!(!current.mentions("fog"));
    }

    #[test]
    fn test_unix_timestamps_round_trip_through_serde() {
        let current = conditions("clear sky");
        let json = serde_json::to_value(&current).unwrap();
        assert_eq!(json["sunriseUnix"], 1_700_000_000);
        assert_eq!(json["temperatureC"], 20.0);
        let back: CurrentConditions = serde_json::from_value(json).unwrap();
        assert_eq!(back, current);
    }
}
