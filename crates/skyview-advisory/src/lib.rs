//! Weather advisory engine for Skyview
//!
//! Derives severity-tagged alerts and routine recommendations from a metric
//! weather snapshot. The rule-based engine is the reference producer; an AI
//! text service can stand in for it through [`AdvisorySource`], with the
//! rules as automatic fallback.

pub mod alerts;
pub mod prompt;
pub mod recommendations;
pub mod service;
pub mod severity;
pub mod types;

pub use alerts::weather_alerts;
pub use prompt::{build_prompt, describe_snapshot, parse_ai_advisory};
pub use recommendations::weather_recommendations;
pub use service::{
    AdvisoryOrigin, AdvisoryOutcome, AdvisoryService, AdvisorySource, NoSource, PromptedSource,
    TextGenerator,
};
pub use severity::{check_severe_weather, SevereWeather};
pub use types::{Advisory, Alert, AlertKind, RecommendationSet};
