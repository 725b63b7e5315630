//! Advisory production with AI substitution and rule-based fallback.
//!
//! The rule-based engine is always available. When AI advisories are active
//! and a source is configured, the source is tried first; any failure or
//! timeout falls back to the rules with the error kept as a diagnostic.

use serde::{Serialize, Serializer};
use skyview_core::{AdvisoryConfig, AdvisoryError};
use skyview_weather::WeatherSnapshot;
use std::future::Future;
use std::time::Duration;

use crate::prompt::{build_prompt, parse_ai_advisory};
use crate::types::Advisory;

pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(15);

/// Any producer of the advisory shapes, e.g. an AI text service.
pub trait AdvisorySource: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    fn advise(
        &self,
        snapshot: &WeatherSnapshot,
    ) -> impl Future<Output = Result<Advisory, AdvisoryError>> + Send;
}

/// Raw text completion, the only thing a provider client has to supply.
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, AdvisoryError>> + Send;
}

/// Adapts a [`TextGenerator`] into an [`AdvisorySource`] by rendering the
/// snapshot into a prompt and parsing the reply.
#[derive(Debug, Clone)]
pub struct PromptedSource<G> {
    generator: G,
}

impl<G: TextGenerator> PromptedSource<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

impl<G: TextGenerator> AdvisorySource for PromptedSource<G> {
    fn name(&self) -> &str {
        self.generator.name()
    }

    async fn advise(&self, snapshot: &WeatherSnapshot) -> Result<Advisory, AdvisoryError> {
        let prompt = build_prompt(snapshot);
        let reply = self.generator.complete(&prompt).await?;
        parse_ai_advisory(&reply)
    }
}

/// Source type for services built without any AI client. It has no values.
#[derive(Debug, Clone, Copy)]
pub enum NoSource {}

impl AdvisorySource for NoSource {
    fn name(&self) -> &str {
        match *self {}
    }

    async fn advise(&self, _snapshot: &WeatherSnapshot) -> Result<Advisory, AdvisoryError> {
        match *self {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryOrigin {
    Ai,
    RuleBased,
}

/// What the caller renders, plus where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryOutcome {
    pub advisory: Advisory,
    pub origin: AdvisoryOrigin,
    /// Why the AI path was skipped or failed, if it was
    #[serde(serialize_with = "serialize_diagnostic")]
    pub diagnostic: Option<AdvisoryError>,
}

fn serialize_diagnostic<S: Serializer>(
    diagnostic: &Option<AdvisoryError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match diagnostic {
        Some(e) => serializer.collect_str(e),
        None => serializer.serialize_none(),
    }
}

impl AdvisoryOutcome {
    fn rule_based(
        snapshot: Option<&WeatherSnapshot>,
        diagnostic: Option<AdvisoryError>,
    ) -> Self {
        Self {
            advisory: Advisory::rule_based(snapshot),
            origin: AdvisoryOrigin::RuleBased,
            diagnostic,
        }
    }
}

pub struct AdvisoryService<S = NoSource> {
    config: AdvisoryConfig,
    source: Option<S>,
    timeout: Duration,
}

impl AdvisoryService<NoSource> {
    /// Service that only ever uses the rule-based engine
    pub fn rule_based_only(config: AdvisoryConfig) -> Self {
        Self::new(config, None)
    }
}

impl<S: AdvisorySource> AdvisoryService<S> {
    pub fn new(config: AdvisoryConfig, source: Option<S>) -> Self {
        Self {
            config,
            source,
            timeout: DEFAULT_AI_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produce an advisory for the snapshot. Never fails: every AI problem
    /// degrades to the rule-based result.
    pub async fn advise(&self, snapshot: Option<&WeatherSnapshot>) -> AdvisoryOutcome {
        let Some(snapshot) = snapshot else {
            return AdvisoryOutcome::rule_based(
                None,
                Some(AdvisoryError::Unavailable(
                    "no current conditions available".to_string(),
                )),
            );
        };

        let source = match self.ai_source() {
            Ok(source) => source,
            Err(AdvisoryError::Disabled) => {
                return AdvisoryOutcome::rule_based(Some(snapshot), None);
            }
            Err(reason) => {
                tracing::debug!("Skipping AI advisories: {}", reason);
                return AdvisoryOutcome::rule_based(Some(snapshot), Some(reason));
            }
        };

        let result = match tokio::time::timeout(self.timeout, source.advise(snapshot)).await {
            Ok(result) => result,
            Err(_) => Err(AdvisoryError::Unavailable(format!(
                "no reply within {:?}",
                self.timeout
            ))),
        };

        match result {
            Ok(advisory) => {
                tracing::info!(
                    "AI advisory from {}: {} alerts",
                    source.name(),
                    advisory.alerts.len()
                );
                AdvisoryOutcome {
                    advisory,
                    origin: AdvisoryOrigin::Ai,
                    diagnostic: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "AI advisory from {} failed, using rule-based engine: {}",
                    source.name(),
                    e
                );
                AdvisoryOutcome::rule_based(Some(snapshot), Some(e))
            }
        }
    }

    fn ai_source(&self) -> Result<&S, AdvisoryError> {
        if !self.config.ai_enabled {
            return Err(AdvisoryError::Disabled);
        }
        if !self.config.ai_active() {
            return Err(AdvisoryError::Unavailable(format!(
                "provider '{}' is unknown or has no API key",
                self.config.ai_provider
            )));
        }
        self.source
            .as_ref()
            .ok_or_else(|| AdvisoryError::Unavailable("no AI client configured".to_string()))
    }
}
