//! Error types for the workout coach

use thiserror::Error;

/// Result type alias for coach operations
pub type Result<T> = std::result::Result<T, CoachError>;

#[derive(Error, Debug)]
pub enum CoachError {

    // =============================
    // Profile & Synthesis Errors
    // =============================

    /// One or more required profile fields are missing, empty or unusable.
    /// Field names are already prettified ("Available Days").
    #[error("Please fill in all required fields: {}", .fields.join(", "))]
    InvalidProfile { fields: Vec<String> },

    #[error("Plan provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Plan provider error: {0}")]
    ProviderError(String),

    #[error("Invalid workout plan: {0}")]
    InvalidPlan(String),

    #[error("Duplicate exercise id in catalog: {0}")]
    DuplicateExercise(String),

    // =============================
    // Persistence & Config Errors
    // =============================

    #[error("No workout plan found: {0}")]
    PlanNotFound(String),

    #[error("State persistence error: {0}")]
    StateError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("UUID parse error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CoachError {
    /// True for errors the caller can fix by correcting their input.
    pub fn is_invalid_profile(&self) -> bool {
        matches!(self, CoachError::InvalidProfile { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_profile_message_lists_fields() {
        let err = CoachError::InvalidProfile {
            fields: vec!["Available Days".to_string(), "Body Type".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Available Days, Body Type"
        );
        assert!(err.is_invalid_profile());
        assert!(!CoachError::ProviderError("boom".into()).is_invalid_profile());
    }
}
