//! Configuration sources.
//!
//! [`Settings`] reads the JSON settings document exported by the dashboard.
//! [`Config`] is the TOML file under the user's config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skyview_weather::{
    DistanceUnit, PrecipitationUnit, PressureUnit, TemperatureUnit, UnitError, UnitPreferences,
    ValidationResult, WindSpeedUnit,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Known AI advisory providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Anthropic,
    Gemini,
}

impl FromStr for AiProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" => Ok(Self::Gemini),
            _ => Err(ConfigError::Invalid(format!("Unknown AI provider: {s}"))),
        }
    }
}

/// AI advisory selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Try the AI provider before the rule-based engine
    #[serde(default)]
    pub ai_enabled: bool,

    #[serde(default = "default_ai_provider")]
    pub ai_provider: String,

    /// API key for the provider; never logged
    #[serde(default)]
    pub ai_api_key: Option<String>,
}

fn default_ai_provider() -> String {
    "openai".to_string()
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            ai_enabled: false,
            ai_provider: default_ai_provider(),
            ai_api_key: None,
        }
    }
}

impl AdvisoryConfig {
    pub fn provider(&self) -> Option<AiProvider> {
        self.ai_provider.parse().ok()
    }

    fn has_api_key(&self) -> bool {
        self.ai_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// AI is enabled, the provider is known, and a key is present
    pub fn ai_active(&self) -> bool {
        self.ai_enabled && self.provider().is_some() && self.has_api_key()
    }
}

/// The persisted settings document written by the dashboard front end.
///
/// Only the unit and AI keys are read; theme, notification, time format
/// and location keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub temperature: Option<String>,
    pub wind_speed: Option<String>,
    pub pressure: Option<String>,
    pub precipitation: Option<String>,
    pub distance: Option<String>,
    #[serde(default)]
    pub ai_enabled: bool,
    pub ai_provider: Option<String>,
    pub ai_api_key: Option<String>,
}

impl Settings {
    /// Parse the settings document.
    ///
    /// # Errors
    /// Returns [`ConfigError::ParseError`] when the document is not valid JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Strict unit preferences: any unrecognised unit string is an error.
    ///
    /// # Errors
    /// Returns the first [`UnitError`] encountered.
    pub fn unit_preferences(&self) -> Result<UnitPreferences, UnitError> {
        Ok(UnitPreferences {
            temperature: parse_or_default(self.temperature.as_deref())?,
            wind_speed: parse_or_default(self.wind_speed.as_deref())?,
            pressure: parse_or_default(self.pressure.as_deref())?,
            precipitation: parse_or_default(self.precipitation.as_deref())?,
            distance: parse_or_default(self.distance.as_deref())?,
        })
    }

    /// Lenient unit preferences: unrecognised values fall back per measure.
    pub fn unit_preferences_or_default(&self) -> UnitPreferences {
        UnitPreferences {
            temperature: lenient::<TemperatureUnit>(self.temperature.as_deref()),
            wind_speed: lenient::<WindSpeedUnit>(self.wind_speed.as_deref()),
            pressure: lenient::<PressureUnit>(self.pressure.as_deref()),
            precipitation: lenient::<PrecipitationUnit>(self.precipitation.as_deref()),
            distance: lenient::<DistanceUnit>(self.distance.as_deref()),
        }
    }

    pub fn advisory_config(&self) -> AdvisoryConfig {
        AdvisoryConfig {
            ai_enabled: self.ai_enabled,
            ai_provider: self
                .ai_provider
                .clone()
                .unwrap_or_else(default_ai_provider),
            ai_api_key: self.ai_api_key.clone(),
        }
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, UnitError>
where
    T: FromStr<Err = UnitError> + Default,
{
    value.map_or_else(|| Ok(T::default()), |s| s.parse())
}

fn lenient<T>(value: Option<&str>) -> T
where
    T: FromStr<Err = UnitError> + Default,
{
    parse_or_default(value).unwrap_or_else(|e| {
        tracing::warn!("{}; using default", e);
        T::default()
    })
}

/// Application configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Display unit preferences
    #[serde(default)]
    pub units: UnitPreferences,

    /// AI advisory settings
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.advisory.provider().is_none() {
            result.add_warning(
                "advisory.ai_provider",
                format!(
                    "Unknown AI provider '{}' - AI advisories will be skipped",
                    self.advisory.ai_provider
                ),
            );
        }

        if self.advisory.ai_enabled && !self.advisory.has_api_key() {
            result.add_error(
                "advisory.ai_api_key",
                "AI advisories are enabled but no API key is set",
            );
        }

        result
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyview");

        Ok(config_dir.join("config.toml"))
    }
}
