//! Workout plan synthesis
//!
//! Two stages, strictly sequential:
//! 1. one attempt at the external provider, decoded into a [`ProviderOutcome`]
//! 2. rule-based synthesis from the exercise catalog when stage 1 is not `Valid`
//!
//! Stage 2 never fails for a valid profile; a thin catalog gives a thinner
//! plan, not an error.

use crate::catalog::{ExercisePool, BOOKEND_CATEGORIES, COOLDOWN, WARMUP};
use crate::models::{UserProfile, WorkoutDay, WorkoutPlan};
use crate::profile::{capitalize, ProfileDraft};
use crate::provider::{decode_plan_response, PlanProvider, ProviderOutcome, UnavailableProvider};
use crate::Result;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const TOTAL_WEEKS: u32 = 4;
/// Session minutes budgeted per main exercise.
pub const MINUTES_PER_EXERCISE: u32 = 15;
pub const WARMUP_COUNT: usize = 3;
pub const COOLDOWN_COUNT: usize = 2;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub struct PlanSynthesizer {
    provider: Box<dyn PlanProvider>,
    pool: ExercisePool,
}

impl PlanSynthesizer {
    pub fn new(provider: Box<dyn PlanProvider>, pool: ExercisePool) -> Self {
        Self { provider, pool }
    }

    /// Rule-based only; the provider stage always falls through.
    pub fn offline(pool: ExercisePool) -> Self {
        Self::new(Box::new(UnavailableProvider::default()), pool)
    }

    pub fn pool(&self) -> &ExercisePool {
        &self.pool
    }

    /// Validate an assessment draft, then synthesize.
    pub async fn synthesize_draft(&self, draft: &ProfileDraft) -> Result<WorkoutPlan> {
        let profile = draft.validate()?;
        self.synthesize(&profile).await
    }

    /// Produce a plan for `profile`.
    ///
    /// Fails only with `InvalidProfile`, before any other work. Provider
    /// problems are logged and absorbed.
    pub async fn synthesize(&self, profile: &UserProfile) -> Result<WorkoutPlan> {
        profile.validate()?;

        info!(
            goal = %profile.fitness_goal,
            level = %profile.fitness_level,
            days = profile.available_days,
            provider = self.provider.name(),
            "Synthesizing workout plan"
        );

        match self.attempt_provider(profile).await {
            ProviderOutcome::Valid(plan) => {
                info!(plan_name = %plan.name, days = plan.days.len(), "Using provider-generated plan");
                Ok(plan)
            }
            ProviderOutcome::Invalid(reason) => {
                warn!(
                    provider = self.provider.name(),
                    reason = %reason,
                    "Provider plan unusable, falling back to rule-based synthesis"
                );
                Ok(self.synthesize_deterministic(profile))
            }
        }
    }

    /// Stage 1: one provider call, decoded. Never retried.
    pub async fn attempt_provider(&self, profile: &UserProfile) -> ProviderOutcome {
        match self.provider.generate(profile).await {
            Ok(text) => decode_plan_response(&text),
            Err(e) => e.into(),
        }
    }

    /// Stage 2: rule-based plan from the catalog.
    pub fn synthesize_deterministic(&self, profile: &UserProfile) -> WorkoutPlan {
        let main_pool = self.pool.for_level(profile.fitness_level);

        // Bookends come from the whole catalog; only main work is level-gated.
        let warmup: Vec<_> = self
            .pool
            .by_category(WARMUP)
            .into_iter()
            .take(WARMUP_COUNT)
            .collect();
        let cooldown: Vec<_> = self
            .pool
            .by_category(COOLDOWN)
            .into_iter()
            .take(COOLDOWN_COUNT)
            .collect();
        let exercises: Vec<_> = main_pool
            .excluding_categories(&BOOKEND_CATEGORIES)
            .into_iter()
            .take(main_exercise_budget(profile.preferred_duration))
            .collect();

        let days: Vec<WorkoutDay> = (1..=profile.available_days)
            .map(|day| WorkoutDay {
                day,
                name: day_name(day).to_string(),
                focus: day_focus(profile, day).to_string(),
                duration: profile.preferred_duration,
                warmup: warmup.clone(),
                exercises: exercises.clone(),
                cooldown: cooldown.clone(),
            })
            .collect();

        debug!(
            days = days.len(),
            main_exercises = exercises.len(),
            "Rule-based plan assembled"
        );

        WorkoutPlan {
            id: format!("plan-{}", Uuid::new_v4()),
            name: plan_name(profile),
            description: plan_description(profile),
            total_weeks: TOTAL_WEEKS,
            days_per_week: profile.available_days,
            estimated_duration: profile.preferred_duration,
            difficulty: profile.fitness_level.as_str().to_string(),
            days,
        }
    }
}

pub fn main_exercise_budget(preferred_duration: u32) -> usize {
    (preferred_duration / MINUTES_PER_EXERCISE) as usize
}

/// Display label only; cycles independently of the focus themes.
pub fn day_name(day: u32) -> &'static str {
    WEEKDAYS[(day.saturating_sub(1) % 7) as usize]
}

pub fn day_focus(profile: &UserProfile, day: u32) -> &'static str {
    profile.fitness_goal.focus_cycle()[(day.saturating_sub(1) % 4) as usize]
}

/// "Beginner Fat Loss Program"
pub fn plan_name(profile: &UserProfile) -> String {
    let goal = profile
        .fitness_goal
        .as_str()
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} {} Program",
        capitalize(profile.fitness_level.as_str()),
        goal
    )
}

/// "A 3-day fat loss program designed for ectomorph body type."
pub fn plan_description(profile: &UserProfile) -> String {
    format!(
        "A {}-day {} program designed for {} body type.",
        profile.available_days,
        profile.fitness_goal.as_str().replace('_', " "),
        profile.body_type
    )
}
