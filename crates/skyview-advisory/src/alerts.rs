//! Severe-weather alert rules.
//!
//! Rule groups run in a fixed order: temperature, UV, precipitation/storm,
//! wind, fog. Within a group the danger tier is checked first and the first
//! match wins, so a group contributes at most one alert.

use skyview_weather::{CurrentConditions, WeatherSnapshot};

use crate::types::Alert;

const EXTREME_HEAT_C: f64 = 40.0;
const EXTREME_COLD_C: f64 = -10.0;
const HEAT_C: f64 = 35.0;
const FREEZING_C: f64 = 0.0;

const EXTREME_UV: f64 = 11.0;
const VERY_HIGH_UV: f64 = 8.0;

const SEVERE_RAIN_PCT: f64 = 90.0;
const HEAVY_RAIN_PCT: f64 = 80.0;

const STRONG_WIND_MPS: f64 = 20.0;
const WINDY_MPS: f64 = 15.0;

const DENSE_FOG_VISIBILITY_M: f64 = 1000.0;

/// Derive alerts for the snapshot. Empty means nothing to show.
pub fn weather_alerts(snapshot: &WeatherSnapshot) -> Vec<Alert> {
    let current = &snapshot.current;

    let alerts: Vec<Alert> = [
        temperature_alert(current),
        uv_alert(current),
        precipitation_alert(current),
        wind_alert(current),
        fog_alert(current),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!("Derived {} weather alerts", alerts.len());
    alerts
}

fn temperature_alert(current: &CurrentConditions) -> Option<Alert> {
    let t = current.temperature_c;
    if t > EXTREME_HEAT_C {
        Some(Alert::danger(
            "🔥",
            "Extreme Heat Warning",
            "Dangerously high temperatures. Stay indoors where possible and drink plenty of water.",
        ))
    } else if t < EXTREME_COLD_C {
        Some(Alert::danger(
            "🥶",
            "Extreme Cold Warning",
            "Dangerously low temperatures. Limit time outdoors and cover exposed skin.",
        ))
    } else if t > HEAT_C {
        Some(Alert::warning(
            "🌡️",
            "Heat Alert",
            "High temperatures today. Stay hydrated and avoid the midday sun.",
        ))
    } else if t < FREEZING_C {
        Some(Alert::warning(
            "❄️",
            "Freezing Alert",
            "Temperatures below freezing. Watch for ice on roads and walkways.",
        ))
    } else {
        None
    }
}

fn uv_alert(current: &CurrentConditions) -> Option<Alert> {
    let uv = current.uv_index;
    if uv >= EXTREME_UV {
        Some(Alert::danger(
            "☀️",
            "Extreme UV Alert",
            "Extreme UV levels. Avoid the sun between 10am and 4pm and cover up.",
        ))
    } else if uv >= VERY_HIGH_UV {
        Some(Alert::warning(
            "🕶️",
            "Very High UV",
            "Very high UV index. Wear SPF 30+ sunscreen and seek shade.",
        ))
    } else {
        None
    }
}

fn precipitation_alert(current: &CurrentConditions) -> Option<Alert> {
    let rain = current.chance_of_rain_pct;
    if rain > SEVERE_RAIN_PCT || current.mentions("thunderstorm") {
        Some(Alert::danger(
            "⛈️",
            "Severe Weather Alert",
            "Severe storms are likely. Stay indoors and avoid travel if you can.",
        ))
    } else if rain > HEAVY_RAIN_PCT {
        Some(Alert::warning(
            "🌧️",
            "Heavy Rain Expected",
            "Heavy rain is expected. Watch for flooding and carry rain gear.",
        ))
    } else {
        None
    }
}

fn wind_alert(current: &CurrentConditions) -> Option<Alert> {
    let wind = current.wind_speed_mps;
    if wind > STRONG_WIND_MPS {
        Some(Alert::danger(
            "🌪️",
            "Strong Wind Warning",
            format!("Wind speeds of {wind:.1} m/s. Secure loose objects and avoid exposed areas."),
        ))
    } else if wind > WINDY_MPS {
        Some(Alert::warning(
            "💨",
            "Windy Conditions",
            format!("Wind speeds of {wind:.1} m/s. Expect gusts and hold on to light items."),
        ))
    } else {
        None
    }
}

fn fog_alert(current: &CurrentConditions) -> Option<Alert> {
    let dense = current
        .visibility_m
        .is_some_and(|v| v < DENSE_FOG_VISIBILITY_M);
    if current.mentions("fog") && dense {
        Some(Alert::warning(
            "🌫️",
            "Dense Fog",
            "Visibility is below 1 km. Drive slowly and use low-beam headlights.",
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{calm, with};
    use crate::types::AlertKind;

    fn titles(alerts: &[Alert]) -> Vec<&str> {
        alerts.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_calm_conditions_have_no_alerts() {
        assert!(weather_alerts(&calm()).is_empty());
    }

    #[test]
    fn test_non_alerting_ranges_stay_quiet() {
        for t in [0.1, 10.0, 25.0, 34.9, 35.0] {
            for uv in [0.0, 7.9] {
                for rain in [0.0, 80.0] {
                    for wind in [0.0, 15.0] {
                        let snapshot = with(|c| {
                            c.temperature_c = t;
                            c.uv_index = uv;
                            c.chance_of_rain_pct = rain;
                            c.wind_speed_mps = wind;
                        });
                        assert!(
                            weather_alerts(&snapshot).is_empty(),
                            "t={t} uv={uv} rain={rain} wind={wind}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_temperature_tiers() {
        let cases = [
            (45.0, Some("Extreme Heat Warning")),
            (40.0, Some("Heat Alert")),
            (35.5, Some("Heat Alert")),
            (35.0, None),
            (0.0, None),
            (-0.5, Some("Freezing Alert")),
            (-10.0, Some("Freezing Alert")),
            (-10.5, Some("Extreme Cold Warning")),
        ];
        for (t, expected) in cases {
            let alerts = weather_alerts(&with(|c| c.temperature_c = t));
            assert_eq!(titles(&alerts).first().copied(), expected, "t={t}");
            assert!(alerts.len() <= 1, "t={t}");
        }
    }

    #[test]
    fn test_extreme_heat_suppresses_heat_alert() {
        let alerts = weather_alerts(&with(|c| c.temperature_c = 45.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Danger);
        assert_eq!(alerts[0].title, "Extreme Heat Warning");
        assert!(!titles(&alerts).contains(&"Heat Alert"));
    }

    #[test]
    fn test_uv_tiers() {
        assert_eq!(
            titles(&weather_alerts(&with(|c| c.uv_index = 11.0))),
            ["Extreme UV Alert"]
        );
        assert_eq!(
            titles(&weather_alerts(&with(|c| c.uv_index = 8.0))),
            ["Very High UV"]
        );
        assert!(weather_alerts(&with(|c| c.uv_index = 7.9)).is_empty());
    }

    #[test]
    fn test_precipitation_and_storm() {
        let storm = weather_alerts(&with(|c| c.description = "Thunderstorm with rain".into()));
        assert_eq!(titles(&storm), ["Severe Weather Alert"]);
        assert_eq!(storm[0].kind, AlertKind::Danger);

        let downpour = weather_alerts(&with(|c| c.chance_of_rain_pct = 95.0));
        assert_eq!(titles(&downpour), ["Severe Weather Alert"]);

        let heavy = weather_alerts(&with(|c| c.chance_of_rain_pct = 85.0));
        assert_eq!(titles(&heavy), ["Heavy Rain Expected"]);
        assert_eq!(heavy[0].kind, AlertKind::Warning);

        assert!(weather_alerts(&with(|c| c.chance_of_rain_pct = 80.0)).is_empty());
    }

    #[test]
    fn test_wind_message_embeds_speed() {
        let strong = weather_alerts(&with(|c| c.wind_speed_mps = 22.345));
        assert_eq!(titles(&strong), ["Strong Wind Warning"]);
        assert!(strong[0].message.contains("22.3 m/s"));

        let windy = weather_alerts(&with(|c| c.wind_speed_mps = 16.0));
        assert_eq!(titles(&windy), ["Windy Conditions"]);
        assert!(windy[0].message.contains("16.0 m/s"));

        assert!(weather_alerts(&with(|c| c.wind_speed_mps = 15.0)).is_empty());
    }

    #[test]
    fn test_fog_requires_keyword_and_low_visibility() {
        let fog = weather_alerts(&with(|c| {
            c.description = "Freezing FOG".into();
            c.visibility_m = Some(400.0);
        }));
        assert_eq!(titles(&fog), ["Dense Fog"]);

        let no_visibility = weather_alerts(&with(|c| {
            c.description = "fog".into();
            c.visibility_m = None;
        }));
        assert!(no_visibility.is_empty());

        let clear_air = weather_alerts(&with(|c| c.visibility_m = Some(400.0)));
        assert!(clear_air.is_empty());
    }

    #[test]
    fn test_rule_groups_keep_fixed_order() {
        let alerts = weather_alerts(&with(|c| {
            c.temperature_c = -12.0;
            c.uv_index = 12.0;
            c.chance_of_rain_pct = 85.0;
            c.wind_speed_mps = 25.0;
            c.description = "fog".into();
            c.visibility_m = Some(200.0);
        }));
        assert_eq!(
            titles(&alerts),
            [
                "Extreme Cold Warning",
                "Extreme UV Alert",
                "Heavy Rain Expected",
                "Strong Wind Warning",
                "Dense Fog",
            ]
        );
    }
}
