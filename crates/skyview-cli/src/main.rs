use anyhow::{bail, Context, Result};
use serde::Serialize;
use skyview_advisory::{AdvisoryOutcome, AdvisoryService, SevereWeather};
use skyview_core::{AdvisoryConfig, AppError, Config, Settings, UnitPreferences};
use skyview_weather::{parse_snapshot, DisplayFormatter, DisplaySnapshot};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str =
    "Usage: skyview <snapshot.json> [--config <config.toml>] [--settings <settings.json>]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    snapshot: PathBuf,
    config: Option<PathBuf>,
    settings: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut settings = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(args.next().context(USAGE)?)),
            "--settings" => settings = Some(PathBuf::from(args.next().context(USAGE)?)),
            flag if flag.starts_with("--") => bail!("Unknown option {flag}\n{USAGE}"),
            path => positional.push(PathBuf::from(path)),
        }
    }

    if positional.len() != 1 {
        bail!(USAGE);
    }

    Ok(Args {
        snapshot: positional.remove(0),
        config,
        settings,
    })
}

/// Settings exported by the dashboard take precedence over the config file.
fn resolve_preferences(args: &Args) -> Result<(UnitPreferences, AdvisoryConfig), AppError> {
    if let Some(path) = &args.settings {
        let settings = Settings::from_json(&std::fs::read_to_string(path)?)?;
        return Ok((
            settings.unit_preferences_or_default(),
            settings.advisory_config(),
        ));
    }

    let (config, _) = Config::load_validated(args.config.as_deref())?;
    Ok((config.units, config.advisory))
}

#[derive(Serialize)]
struct Report {
    conditions: Option<DisplaySnapshot>,
    severity: SevereWeather,
    #[serde(flatten)]
    outcome: AdvisoryOutcome,
}

async fn run(args: &Args) -> Result<Report, AppError> {
    let (prefs, advisory_config) = resolve_preferences(args)?;
    let snapshot = parse_snapshot(&read_snapshot(&args.snapshot)?)?;

    // No AI client is linked into this binary; enabled AI reports a diagnostic.
    let service = AdvisoryService::rule_based_only(advisory_config);
    let outcome = service.advise(snapshot.as_ref()).await;

    if let Some(diagnostic) = &outcome.diagnostic {
        tracing::info!("Advisory diagnostic: {}", diagnostic);
        eprintln!("{}", diagnostic.user_message());
    }

    let formatter = DisplayFormatter::new(prefs);
    Ok(Report {
        conditions: snapshot.as_ref().map(|s| formatter.convert_snapshot(s)),
        severity: outcome.advisory.severity(),
        outcome,
    })
}

fn read_snapshot(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|e| {
        tracing::error!("Failed to read snapshot {}: {}", path.display(), e);
        AppError::Io(e)
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = skyview_core::init() {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let report = match run(&args).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render report: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyview_weather::TemperatureUnit;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn test_snapshot_only() {
        let parsed = args(&["now.json"]).unwrap();
        assert_eq!(parsed.snapshot, PathBuf::from("now.json"));
        assert_eq!(parsed.config, None);
        assert_eq!(parsed.settings, None);
    }

    #[test]
    fn test_options_in_any_position() {
        let parsed = args(&["--settings", "s.json", "now.json", "--config", "c.toml"]).unwrap();
        assert_eq!(parsed.snapshot, PathBuf::from("now.json"));
        assert_eq!(parsed.config, Some(PathBuf::from("c.toml")));
        assert_eq!(parsed.settings, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(args(&[]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
        assert!(args(&["now.json", "--config"]).is_err());
        assert!(args(&["now.json", "--verbose"]).is_err());
    }

    #[test]
    fn test_settings_file_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(
            &settings,
            r#"{"temperature": "Fahrenheit", "windSpeed": "furlongs"}"#,
        )
        .unwrap();

        let parsed = Args {
            snapshot: dir.path().join("now.json"),
            config: None,
            settings: Some(settings),
        };
        let (prefs, advisory) = resolve_preferences(&parsed).unwrap();
        assert_eq!(prefs.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.wind_speed, UnitPreferences::default().wind_speed);
        assert!(!advisory.ai_enabled);
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[units]\ntemperature = \"Fahrenheit\"\n").unwrap();

        let parsed = Args {
            config: Some(path),
            ..Args::default()
        };
        let (prefs, advisory) = resolve_preferences(&parsed).unwrap();
        assert_eq!(prefs.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(advisory, AdvisoryConfig::default());
    }

    #[test]
    fn test_invalid_config_reports_config_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[advisory]\nai_enabled = true\n").unwrap();

        let parsed = Args {
            config: Some(path),
            ..Args::default()
        };
        let err = resolve_preferences(&parsed).unwrap_err();
        assert_eq!(
            err.user_message(),
            "Invalid configuration. Check your settings."
        );
    }

    #[tokio::test]
    async fn test_run_failures_map_to_user_messages() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(&settings, "{}").unwrap();

        let missing = Args {
            snapshot: dir.path().join("absent.json"),
            config: None,
            settings: Some(settings.clone()),
        };
        assert!(matches!(run(&missing).await, Err(AppError::Io(_))));

        let garbled = dir.path().join("garbled.json");
        std::fs::write(&garbled, "not json").unwrap();
        let err = run(&Args {
            snapshot: garbled,
            config: None,
            settings: Some(settings),
        })
        .await
        .err()
        .unwrap();
        assert_eq!(
            err.user_message(),
            "Weather data could not be read. Check the snapshot file."
        );
    }

    #[tokio::test]
    async fn test_run_without_current_conditions_is_neutral() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(&settings, r#"{"aiEnabled": false}"#).unwrap();
        let snapshot = dir.path().join("now.json");
        std::fs::write(&snapshot, r#"{"daily": null}"#).unwrap();

        let report = run(&Args {
            snapshot,
            config: None,
            settings: Some(settings),
        })
        .await
        .unwrap();
        assert!(report.conditions.is_none());
        assert!(!report.severity.has_severe);
        assert!(report.outcome.advisory.alerts.is_empty());
    }
}
