//! External plan providers
//!
//! A provider turns a profile into raw model text. Decoding that text is a
//! separate stage producing a [`ProviderOutcome`], so the synthesizer's
//! fallback decision is a plain match.

use crate::config::CoachConfig;
use crate::error::CoachError;
use crate::models::{UserProfile, WorkoutPlan};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

pub mod gemini;
pub use gemini::GeminiPlanProvider;

/// Trait for generative plan sources (best effort, one attempt per call)
#[async_trait]
pub trait PlanProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Raw response text for this profile.
    async fn generate(&self, profile: &UserProfile) -> Result<String>;
}

/// Result of decoding one provider response.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Valid(WorkoutPlan),
    Invalid(String),
}

impl ProviderOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProviderOutcome::Valid(_))
    }
}

impl From<CoachError> for ProviderOutcome {
    fn from(err: CoachError) -> Self {
        ProviderOutcome::Invalid(err.to_string())
    }
}

/// Decode model text into a plan.
///
/// Only the outermost `{ ... }` span is parsed. A plan is accepted when it
/// has a non-empty `name` string and a non-empty `days` array; day count and
/// exercise content are not checked, and mistyped leaves decode to defaults.
pub fn decode_plan_response(text: &str) -> ProviderOutcome {
    let Some(json) = extract_json_object(text) else {
        return ProviderOutcome::Invalid("no JSON object in response".to_string());
    };

    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => return ProviderOutcome::Invalid(format!("malformed plan JSON: {}", e)),
    };

    if let Err(reason) = check_structure(&value) {
        return ProviderOutcome::Invalid(reason);
    }

    match serde_json::from_value::<WorkoutPlan>(value) {
        Ok(plan) => ProviderOutcome::Valid(plan),
        Err(e) => ProviderOutcome::Invalid(format!("malformed plan JSON: {}", e)),
    }
}

pub fn check_structure(value: &Value) -> std::result::Result<(), String> {
    let has_name = value
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty());
    if !has_name {
        return Err("missing name".to_string());
    }

    let has_days = value
        .get("days")
        .and_then(Value::as_array)
        .is_some_and(|days| !days.is_empty());
    if !has_days {
        return Err("missing or empty days".to_string());
    }

    Ok(())
}

/// First `{` through last `}`, inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Gemini when a key is configured, otherwise the unavailable stand-in.
pub fn provider_from_config(config: &CoachConfig) -> Result<Box<dyn PlanProvider>> {
    match &config.gemini {
        Some(gemini) => {
            info!(model = %gemini.model, "Gemini plan provider enabled");
            Ok(Box::new(GeminiPlanProvider::new(gemini.clone())?))
        }
        None => {
            warn!("GEMINI_API_KEY not set; using rule-based plans only");
            Ok(Box::new(UnavailableProvider::new("GEMINI_API_KEY not configured")))
        }
    }
}

/// Stand-in used when no provider is configured.
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableProvider {
    fn default() -> Self {
        Self::new("no plan provider configured")
    }
}

#[async_trait]
impl PlanProvider for UnavailableProvider {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn generate(&self, _profile: &UserProfile) -> Result<String> {
        Err(CoachError::ProviderUnavailable(self.reason.clone()))
    }
}

/// Provider double returning a fixed response or error.
#[cfg(test)]
pub(crate) struct ScriptedProvider {
    response: std::result::Result<String, String>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedProvider {
    pub(crate) fn responding(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub(crate) fn returning(plan: &WorkoutPlan) -> Self {
        Self::responding(serde_json::to_string(plan).unwrap())
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl PlanProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _profile: &UserProfile) -> Result<String> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.response
            .clone()
            .map_err(CoachError::ProviderError)
    }
}
