//! Gemini-backed plan provider
//!
//! Asks the model for a complete plan in the same JSON shape the
//! rule-based synthesizer produces.

use crate::config::GeminiConfig;
use crate::gemini::GeminiClient;
use crate::models::UserProfile;
use crate::provider::PlanProvider;
use crate::Result;
use async_trait::async_trait;
use tracing::debug;

pub struct GeminiPlanProvider {
    client: GeminiClient,
}

impl GeminiPlanProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }

    /// Build structured planning prompt
    pub fn build_prompt(profile: &UserProfile) -> String {
        let exercise_shape = r#"{
          "id": "string",
          "name": "string",
          "category": "string",
          "sets": number,
          "reps": "string",
          "restTime": number,
          "description": "string",
          "muscleGroups": ["string"],
          "equipment": ["string"],
          "difficulty": "beginner|intermediate|advanced"
        }"#;

        format!(
            r#"Create a personalized workout plan for the following user profile:
- Age: {}
- Gender: {}
- Height: {} cm
- Weight: {} kg
- Body Type: {}
- Fitness Goal: {}
- Fitness Level: {}
- Available Days: {}
- Preferred Duration: {} minutes

Rules:
- One entry in "days" per available day, numbered from 1
- Every day lasts the preferred duration
- Return ONLY valid JSON
- No explanation text

Return the response in this exact JSON format:
{{
  "name": "string",
  "description": "string",
  "totalWeeks": 4,
  "daysPerWeek": number,
  "estimatedDuration": number,
  "difficulty": "beginner|intermediate|advanced",
  "days": [
    {{
      "day": number,
      "name": "string",
      "focus": "string",
      "duration": number,
      "warmup": [{shape}],
      "exercises": [{shape}],
      "cooldown": [{shape}]
    }}
  ]
}}
"#,
            profile.age,
            profile.gender,
            profile.height,
            profile.weight,
            profile.body_type,
            profile.fitness_goal,
            profile.fitness_level,
            profile.available_days,
            profile.preferred_duration,
            shape = exercise_shape,
        )
    }
}

#[async_trait]
impl PlanProvider for GeminiPlanProvider {
    fn name(&self) -> &str {
        self.client.model()
    }

    async fn generate(&self, profile: &UserProfile) -> Result<String> {
        let prompt = Self::build_prompt(profile);
        debug!(prompt_len = prompt.len(), "Requesting plan from Gemini");
        self.client.generate(&prompt).await
    }
}
