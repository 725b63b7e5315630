use serde::{Deserialize, Serialize};
use skyview_weather::WeatherSnapshot;

use crate::alerts::weather_alerts;
use crate::recommendations::weather_recommendations;
use crate::severity::SevereWeather;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Danger,
}

/// A severe-condition notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    #[serde(default = "default_icon")]
    pub icon: String,
    pub title: String,
    pub message: String,
}

fn default_icon() -> String {
    "⚠️".to_string()
}

impl Alert {
    pub(crate) fn new(
        kind: AlertKind,
        icon: &str,
        title: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            icon: icon.to_string(),
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn danger(icon: &str, title: &str, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Danger, icon, title, message)
    }

    pub fn warning(icon: &str, title: &str, message: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, icon, title, message)
    }
}

/// Routine guidance, accumulated rule group by rule group.
///
/// Entries are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationSet {
    pub clothing: Vec<String>,
    pub accessories: Vec<String>,
    pub activities: Vec<String>,
    pub tips: Vec<String>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.clothing.is_empty()
            && self.accessories.is_empty()
            && self.activities.is_empty()
            && self.tips.is_empty()
    }
}

/// Alerts plus recommendations for one snapshot, recomputed on every call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub recommendations: RecommendationSet,
}

impl Advisory {
    /// Run the rule-based engine. A missing snapshot yields the neutral
    /// advisory: no alerts and all recommendation lists empty.
    pub fn rule_based(snapshot: Option<&WeatherSnapshot>) -> Self {
        match snapshot {
            Some(snapshot) => Self {
                alerts: weather_alerts(snapshot),
                recommendations: weather_recommendations(snapshot),
            },
            None => Self::default(),
        }
    }

    pub fn severity(&self) -> SevereWeather {
        SevereWeather::from_alerts(&self.alerts)
    }
}
