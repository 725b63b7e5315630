//! Natural-language rendering of a snapshot for AI text services, and
//! parsing of their replies back into the advisory shapes.

use serde::Deserialize;
use skyview_core::AdvisoryError;
use skyview_weather::WeatherSnapshot;
use std::fmt::Write;

use crate::types::{Advisory, Alert, RecommendationSet};

const REPLY_INSTRUCTIONS: &str = r#"Reply with JSON only, in this exact shape:
{"alerts": [{"type": "danger" | "warning", "icon": "<emoji>", "title": "<short title>", "message": "<one sentence>"}],
 "recommendations": {"clothing": [], "accessories": [], "activities": [], "tips": []}}
Only include alerts for genuinely severe conditions. Always suggest at least one activity."#;

/// Plain-text description of the snapshot in metric units.
pub fn describe_snapshot(snapshot: &WeatherSnapshot) -> String {
    let c = &snapshot.current;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Current conditions: {}.", c.description);
    let _ = writeln!(
        out,
        "Temperature {:.1}°C (feels like {:.1}°C), humidity {:.0}%, chance of rain {:.0}%.",
        c.temperature_c, c.feels_like_c, c.humidity_pct, c.chance_of_rain_pct
    );
    let _ = writeln!(
        out,
        "Wind {:.1} m/s, UV index {:.1}, pressure {:.0} hPa.",
        c.wind_speed_mps, c.uv_index, c.pressure_hpa
    );
    if let Some(visibility) = c.visibility_m {
        let _ = writeln!(out, "Visibility {visibility:.0} m.");
    }
    let _ = writeln!(
        out,
        "Sunrise {} UTC, sunset {} UTC.",
        c.sunrise.format("%H:%M"),
        c.sunset.format("%H:%M")
    );

    if !snapshot.hourly.is_empty() {
        let hours: Vec<String> = snapshot
            .hourly
            .iter()
            .map(|h| format!("{} {:.1}°C", h.time, h.temperature_c))
            .collect();
        let _ = writeln!(out, "Next hours: {}.", hours.join(", "));
    }

    if !snapshot.daily.is_empty() {
        let _ = writeln!(out, "Forecast:");
        for day in &snapshot.daily {
            let _ = writeln!(
                out,
                "- {}: {}, high {:.1}°C, low {:.1}°C",
                day.day, day.description, day.temp_high_c, day.temp_low_c
            );
        }
    }

    out
}

/// Full prompt: the snapshot description followed by the reply contract.
pub fn build_prompt(snapshot: &WeatherSnapshot) -> String {
    format!(
        "You are a weather assistant. Based on these conditions, give safety alerts and \
         practical recommendations.\n\n{}\n{}",
        describe_snapshot(snapshot),
        REPLY_INSTRUCTIONS
    )
}

#[derive(Debug, Deserialize)]
struct AiReply {
    #[serde(default)]
    alerts: Vec<Alert>,
    #[serde(default)]
    recommendations: RecommendationSet,
}

/// Parse an AI reply into an [`Advisory`].
///
/// Accepts bare JSON or JSON inside a Markdown code fence, with or without
/// surrounding prose.
///
/// # Errors
/// Returns [`AdvisoryError::InvalidResponse`] when no JSON object can be
/// parsed or when the reply suggests no activities.
pub fn parse_ai_advisory(reply: &str) -> Result<Advisory, AdvisoryError> {
    let body = extract_json_object(reply)
        .ok_or_else(|| AdvisoryError::InvalidResponse("no JSON object in reply".to_string()))?;

    let parsed: AiReply = serde_json::from_str(body)
        .map_err(|e| AdvisoryError::InvalidResponse(e.to_string()))?;

    if parsed.recommendations.activities.is_empty() {
        return Err(AdvisoryError::InvalidResponse(
            "reply has no activities".to_string(),
        ));
    }

    Ok(Advisory {
        alerts: parsed.alerts,
        recommendations: parsed.recommendations,
    })
}

fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{calm, with};
    use crate::types::AlertKind;
    use skyview_weather::{DailyForecast, HourlyForecast};

    const REPLY: &str = r#"{
        "alerts": [{"type": "warning", "icon": "🕶️", "title": "Very High UV", "message": "Cover up."}],
        "recommendations": {
            "clothing": ["Linen shirt"],
            "accessories": ["Sunglasses"],
            "activities": ["Museum visit"],
            "tips": ["Stay in the shade."]
        }
    }"#;

    #[test]
    fn test_describe_snapshot_mentions_key_readings() {
        let mut snapshot = with(|c| {
            c.temperature_c = 42.0;
            c.description = "clear sky".into();
        });
        snapshot.hourly.push(HourlyForecast {
            time: "15:00".into(),
            temperature_c: 43.0,
            icon: "01d".into(),
        });
        snapshot.daily.push(DailyForecast {
            day: "Mon".into(),
            icon: "01d".into(),
            description: "sunny".into(),
            temp_high_c: 44.0,
            temp_low_c: 29.0,
        });

        let text = describe_snapshot(&snapshot);
        assert!(text.contains("clear sky"));
        assert!(text.contains("Temperature 42.0°C"));
        assert!(text.contains("Wind 3.0 m/s"));
        assert!(text.contains("Visibility 10000 m"));
        assert!(text.contains("15:00 43.0°C"));
        assert!(text.contains("- Mon: sunny, high 44.0°C, low 29.0°C"));
    }

    #[test]
    fn test_describe_snapshot_skips_missing_visibility() {
        let text = describe_snapshot(&with(|c| c.visibility_m = None));
        assert!(!text.contains("Visibility"));
    }

    #[test]
    fn test_build_prompt_includes_reply_contract() {
        let prompt = build_prompt(&calm());
        assert!(prompt.contains("\"recommendations\""));
        assert!(prompt.contains("Current conditions"));
    }

    #[test]
    fn test_parse_plain_reply() {
        let advisory = parse_ai_advisory(REPLY).unwrap();
        assert_eq!(advisory.alerts.len(), 1);
        assert_eq!(advisory.alerts[0].kind, AlertKind::Warning);
        assert_eq!(advisory.recommendations.activities, ["Museum visit"]);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let fenced = format!("Here you go:\n```json\n{REPLY}\n```\n");
        let advisory = parse_ai_advisory(&fenced).unwrap();
        assert_eq!(advisory.recommendations.tips, ["Stay in the shade."]);
    }

    #[test]
    fn test_missing_icon_gets_default() {
        let reply = r#"{"alerts": [{"type": "danger", "title": "Storm", "message": "Stay in."}],
                        "recommendations": {"activities": ["Board games"]}}"#;
        let advisory = parse_ai_advisory(reply).unwrap();
        assert_eq!(advisory.alerts[0].icon, "⚠️");
        assert!(advisory.recommendations.clothing.is_empty());
    }

    #[test]
    fn test_invalid_replies() {
        assert!(matches!(
            parse_ai_advisory("I cannot help with that."),
            Err(AdvisoryError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_ai_advisory(r#"{"alerts": [{"type": "severe"}]}"#),
            Err(AdvisoryError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_ai_advisory(r#"{"alerts": []}"#),
            Err(AdvisoryError::InvalidResponse(_))
        ));
    }
}
