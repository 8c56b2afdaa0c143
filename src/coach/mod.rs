//! Coach - the assessment flow and progress tracking
//!
//! ASSESS → STORE PROFILE → SYNTHESIZE → STORE PLAN

use crate::error::CoachError;
use crate::models::{UserProfile, WorkoutPlan, WorkoutProgress};
use crate::profile::ProfileDraft;
use crate::state::PlanStore;
use crate::synthesizer::PlanSynthesizer;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Outcome of a completed assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub user_id: Uuid,
    pub profile: UserProfile,
    pub plan: WorkoutPlan,
}

pub struct Coach {
    synthesizer: PlanSynthesizer,
    store: Box<dyn PlanStore>,
}

impl Coach {
    pub fn new(synthesizer: PlanSynthesizer, store: Box<dyn PlanStore>) -> Self {
        Self { synthesizer, store }
    }

    pub fn synthesizer(&self) -> &PlanSynthesizer {
        &self.synthesizer
    }

    pub fn store(&self) -> &dyn PlanStore {
        self.store.as_ref()
    }

    /// Validate the draft, store the profile, build a plan and store it.
    /// Nothing is stored when validation fails.
    pub async fn complete_assessment(
        &self,
        user_id: Uuid,
        draft: &ProfileDraft,
    ) -> Result<AssessmentResult> {
        let start_time = Instant::now();
        let profile = draft.validate()?;

        info!(user_id = %user_id, "Coach: assessment received");

        let profile = self.store.upsert_profile(user_id, profile).await?;
        debug!(user_id = %user_id, "Profile stored");

        let plan = self.synthesizer.synthesize(&profile).await?;
        let plan = self.store.save_plan(user_id, plan).await?;

        info!(
            user_id = %user_id,
            plan_id = %plan.id,
            plan_name = %plan.name,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Coach: plan ready"
        );

        Ok(AssessmentResult {
            user_id,
            profile,
            plan,
        })
    }

    /// Toggle one exercise. `plan_id` defaults to the user's current plan.
    pub async fn update_progress(
        &self,
        user_id: Uuid,
        plan_id: Option<&str>,
        day: u32,
        exercise_id: &str,
        completed: bool,
    ) -> Result<WorkoutProgress> {
        let plan_id = match plan_id {
            Some(id) if !id.trim().is_empty() => {
                let known = self
                    .store
                    .list_plans(user_id)
                    .await?
                    .iter()
                    .any(|p| p.id == id);
                if !known {
                    return Err(CoachError::PlanNotFound(id.to_string()));
                }
                id.to_string()
            }
            _ => self
                .store
                .current_plan(user_id)
                .await?
                .map(|p| p.id)
                .ok_or_else(|| CoachError::PlanNotFound(format!("user {}", user_id)))?,
        };

        debug!(
            user_id = %user_id,
            plan_id = %plan_id,
            day,
            exercise_id,
            completed,
            "Updating progress"
        );

        self.store
            .set_progress(user_id, &plan_id, day, exercise_id, completed)
            .await
    }
}

/// Percentage of `day`'s main exercises completed, 0..=100.
pub fn day_completion(plan: &WorkoutPlan, day: u32, progress: &[WorkoutProgress]) -> f64 {
    let Some(workout_day) = plan.day(day) else {
        return 0.0;
    };
    let total = workout_day.exercises.len();
    if total == 0 {
        return 0.0;
    }

    let done: HashSet<&str> = progress
        .iter()
        .filter(|p| p.plan_id == plan.id && p.day == day && p.completed)
        .map(|p| p.exercise_id.as_str())
        .collect();

    let completed = workout_day
        .exercises
        .iter()
        .filter(|e| done.contains(e.id.as_str()))
        .count();

    completed as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExercisePool;
    use crate::profile::sample_draft;
    use crate::state::InMemoryPlanStore;

    fn coach() -> Coach {
        Coach::new(
            PlanSynthesizer::offline(ExercisePool::built_in()),
            Box::new(InMemoryPlanStore::new()),
        )
    }

    #[tokio::test]
    async fn test_complete_assessment() {
        let coach = coach();
        let user = Uuid::new_v4();

        let result = coach.complete_assessment(user, &sample_draft()).await.unwrap();
        assert_eq!(result.plan.name, "Beginner Fat Loss Program");

        let current = coach.store().current_plan(user).await.unwrap().unwrap();
        assert_eq!(current.id, result.plan.id);
        assert_eq!(
            coach.store().load_profile(user).await.unwrap(),
            Some(result.profile)
        );
    }

    #[tokio::test]
    async fn test_invalid_assessment_stores_nothing() {
        let coach = coach();
        let user = Uuid::new_v4();
        let mut draft = sample_draft();
        draft.name = None;

        let err = coach.complete_assessment(user, &draft).await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields: Name");
        assert!(coach.store().load_profile(user).await.unwrap().is_none());
        assert!(coach.store().current_plan(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_progress_defaults_to_current_plan() {
        let coach = coach();
        let user = Uuid::new_v4();

        let missing = coach.update_progress(user, None, 1, "pushup", true).await;
        assert!(matches!(missing, Err(CoachError::PlanNotFound(_))));

        let result = coach.complete_assessment(user, &sample_draft()).await.unwrap();
        let entry = coach
            .update_progress(user, None, 1, "pushup", true)
            .await
            .unwrap();
        assert_eq!(entry.plan_id, result.plan.id);

        coach
            .update_progress(user, Some(&result.plan.id), 1, "squat", true)
            .await
            .unwrap();

        let progress = coach.store().load_progress(user).await.unwrap();
        let percent = day_completion(&result.plan, 1, &progress);
        assert!((percent - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(day_completion(&result.plan, 2, &progress), 0.0);
        assert_eq!(day_completion(&result.plan, 9, &progress), 0.0);
    }

    #[tokio::test]
    async fn test_day_completion_counts_main_exercises_only() {
        let coach = coach();
        let user = Uuid::new_v4();
        let result = coach.complete_assessment(user, &sample_draft()).await.unwrap();

        for exercise_id in ["pushup", "pushup", "jumping-jacks", "stretching", "not-in-plan"] {
            coach
                .update_progress(user, None, 1, exercise_id, true)
                .await
                .unwrap();
        }

        let progress = coach.store().load_progress(user).await.unwrap();
        let percent = day_completion(&result.plan, 1, &progress);
        assert!((percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_progress_rejects_unknown_plan() {
        let coach = coach();
        let user = Uuid::new_v4();
        let result = coach.complete_assessment(user, &sample_draft()).await.unwrap();

        let err = coach
            .update_progress(user, Some("no-such-plan"), 1, "pushup", true)
            .await
            .unwrap_err();
        assert!(matches!(err, CoachError::PlanNotFound(_)));

        let other = Uuid::new_v4();
        let err = coach
            .update_progress(other, Some(&result.plan.id), 1, "pushup", true)
            .await
            .unwrap_err();
        assert!(matches!(err, CoachError::PlanNotFound(_)));
        assert!(coach.store().load_progress(user).await.unwrap().is_empty());
    }
}
