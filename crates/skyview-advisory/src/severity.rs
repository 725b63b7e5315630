//! Severity summary used to highlight the weather view.

use serde::Serialize;
use skyview_weather::WeatherSnapshot;

use crate::alerts::weather_alerts;
use crate::types::{Alert, AlertKind};

/// Whether a summary view should be highlighted, and how strongly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SevereWeather {
    pub has_severe: bool,
    pub alert_type: Option<AlertKind>,
}

impl SevereWeather {
    /// Danger dominates warning; no alerts means nothing severe.
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let alert_type = alerts.iter().map(|a| a.kind).max();
        Self {
            has_severe: alert_type.is_some(),
            alert_type,
        }
    }
}

pub fn check_severe_weather(snapshot: &WeatherSnapshot) -> SevereWeather {
    SevereWeather::from_alerts(&weather_alerts(snapshot))
}
