//! Runtime configuration
//!
//! Read once from the environment (after `.env` is loaded) and passed to
//! constructors. A missing Gemini key is not an error: the coach simply
//! runs with the rule-based planner only.

use crate::error::CoachError;
use crate::Result;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// `None` when no API key is configured
    pub gemini: Option<GeminiConfig>,
    pub port: u16,
}

impl CoachConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; keeps tests away from process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let gemini = match get("GEMINI_API_KEY") {
            Some(api_key) => {
                let mut gemini = GeminiConfig::new(api_key);
                if let Some(model) = get("GEMINI_MODEL") {
                    gemini.model = model;
                }
                if let Some(base_url) = get("GEMINI_BASE_URL") {
                    gemini.base_url = base_url;
                }
                if let Some(secs) = get("GEMINI_TIMEOUT_SECS") {
                    let secs: u64 = secs.parse().map_err(|_| {
                        CoachError::ConfigError(format!("GEMINI_TIMEOUT_SECS is not a number: {}", secs))
                    })?;
                    gemini.timeout = Duration::from_secs(secs);
                }
                Some(gemini)
            }
            None => None,
        };

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(port) => port
                .parse()
                .map_err(|_| CoachError::ConfigError(format!("invalid port: {}", port)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { gemini, port })
    }
}
