//! Centralized error types for Skyview.
//!
//! Every error can be turned into a short, non-technical message via
//! `user_message()` while keeping the full context for logging.

use skyview_weather::SnapshotError;
use thiserror::Error;

/// Top-level application error type.
///
/// Advisory failures are not represented here: they never fail a run and
/// surface as diagnostics on the advisory outcome instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Snapshot(SnapshotError::Parse(_)) => {
                "Weather data could not be read. Check the snapshot file."
            }
            AppError::Snapshot(SnapshotError::Invalid(_)) => {
                "Weather data looks incomplete. Check the snapshot file."
            }
            AppError::Io(_) => "A file could not be read. Check the path and permissions.",
            // Config loading reports through anyhow with added context.
            AppError::Other(e) => match e.downcast_ref::<ConfigError>() {
                Some(config) => config.user_message(),
                None => "An unexpected error occurred. Please try again.",
            },
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Errors from an external advisory producer (AI text service).
///
/// These never reach the user as a failure: the rule-based engine takes
/// over and the message is kept only as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    #[error("AI advisories are disabled")]
    Disabled,

    #[error("AI provider unavailable: {0}")]
    Unavailable(String),

    #[error("AI request failed: {0}")]
    Request(String),

    #[error("AI response could not be parsed: {0}")]
    InvalidResponse(String),
}

impl AdvisoryError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AdvisoryError::Disabled => "AI insights are turned off.",
            AdvisoryError::Unavailable(_) | AdvisoryError::Request(_) => {
                "AI insights are unavailable. Showing standard advice."
            }
            AdvisoryError::InvalidResponse(_) => {
                "AI insights could not be read. Showing standard advice."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Config(ConfigError::Invalid("test".into())),
            AppError::Snapshot(SnapshotError::Invalid("daily".into())),
            AppError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
            AppError::Other(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{err}");
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let err: AppError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, AppError::Config(ConfigError::ParseError(_))));

        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .map_err(SnapshotError::from)
            .unwrap_err()
            .into();
        assert_eq!(
            err.user_message(),
            "Weather data could not be read. Check the snapshot file."
        );
    }

    #[test]
    fn test_config_error_behind_context_keeps_its_message() {
        let err: anyhow::Error = Err::<(), _>(ConfigError::Invalid("no key".into()))
            .context("Failed to load config")
            .unwrap_err();
        let err = AppError::from(err);
        assert_eq!(
            err.user_message(),
            "Invalid configuration. Check your settings."
        );
        assert!(err.to_string().contains("no key"));
    }

    #[test]
    fn test_advisory_user_messages() {
        assert_eq!(
            AdvisoryError::Unavailable("offline".into()).user_message(),
            "AI insights are unavailable. Showing standard advice."
        );
        assert_eq!(
            AdvisoryError::Disabled.user_message(),
            "AI insights are turned off."
        );
    }
}
