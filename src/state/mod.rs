//! Persistence layer
//!
//! Profiles, stored plans and per-exercise progress.
//! Currently in-memory; the trait is the seam for a hosted backend.

use crate::models::{UserProfile, WorkoutPlan, WorkoutProgress};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Trait for plan persistence
#[async_trait::async_trait]
pub trait PlanStore: Send + Sync {
    async fn upsert_profile(&self, user_id: Uuid, profile: UserProfile) -> Result<UserProfile>;
    async fn load_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;

    /// Store a plan under a freshly assigned id; returns the stored copy.
    async fn save_plan(&self, user_id: Uuid, plan: WorkoutPlan) -> Result<WorkoutPlan>;
    /// Newest first.
    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<WorkoutPlan>>;
    async fn current_plan(&self, user_id: Uuid) -> Result<Option<WorkoutPlan>>;

    async fn set_progress(
        &self,
        user_id: Uuid,
        plan_id: &str,
        day: u32,
        exercise_id: &str,
        completed: bool,
    ) -> Result<WorkoutProgress>;
    async fn load_progress(&self, user_id: Uuid) -> Result<Vec<WorkoutProgress>>;
}

struct StoredPlan {
    plan: WorkoutPlan,
    created_at: DateTime<Utc>,
    /// Tie-break for plans saved within the same clock tick
    sequence: u64,
}

/// In-memory plan store for development
pub struct InMemoryPlanStore {
    profiles: Arc<RwLock<HashMap<Uuid, UserProfile>>>,
    plans_by_user: Arc<RwLock<HashMap<Uuid, Vec<StoredPlan>>>>,
    progress_by_user: Arc<RwLock<HashMap<Uuid, Vec<WorkoutProgress>>>>,
    sequence: Arc<RwLock<u64>>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
            plans_by_user: Arc::new(RwLock::new(HashMap::new())),
            progress_by_user: Arc::new(RwLock::new(HashMap::new())),
            sequence: Arc::new(RwLock::new(0)),
        }
    }
}

impl Default for InMemoryPlanStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PlanStore for InMemoryPlanStore {

    async fn upsert_profile(&self, user_id: Uuid, profile: UserProfile) -> Result<UserProfile> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn load_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&user_id).cloned())
    }

    async fn save_plan(&self, user_id: Uuid, mut plan: WorkoutPlan) -> Result<WorkoutPlan> {
        plan.id = Uuid::new_v4().to_string();

        let sequence = {
            let mut sequence = self.sequence.write().await;
            *sequence += 1;
            *sequence
        };

        let mut plans = self.plans_by_user.write().await;
        plans.entry(user_id).or_default().push(StoredPlan {
            plan: plan.clone(),
            created_at: Utc::now(),
            sequence,
        });

        Ok(plan)
    }

    async fn list_plans(&self, user_id: Uuid) -> Result<Vec<WorkoutPlan>> {
        let plans = self.plans_by_user.read().await;

        let mut stored: Vec<&StoredPlan> = plans
            .get(&user_id)
            .map(|v| v.iter().collect())
            .unwrap_or_default();

        stored.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.sequence.cmp(&a.sequence))
        });

        Ok(stored.into_iter().map(|s| s.plan.clone()).collect())
    }

    async fn current_plan(&self, user_id: Uuid) -> Result<Option<WorkoutPlan>> {
        Ok(self.list_plans(user_id).await?.into_iter().next())
    }

    async fn set_progress(
        &self,
        user_id: Uuid,
        plan_id: &str,
        day: u32,
        exercise_id: &str,
        completed: bool,
    ) -> Result<WorkoutProgress> {
        let completed_at = completed.then(Utc::now);

        let mut progress = self.progress_by_user.write().await;
        let entries = progress.entry(user_id).or_default();

        if let Some(existing) = entries
            .iter_mut()
            .find(|p| p.plan_id == plan_id && p.day == day && p.exercise_id == exercise_id)
        {
            existing.completed = completed;
            existing.completed_at = completed_at;
            return Ok(existing.clone());
        }

        let entry = WorkoutProgress {
            progress_id: Uuid::new_v4(),
            user_id,
            plan_id: plan_id.to_string(),
            day,
            exercise_id: exercise_id.to_string(),
            completed,
            completed_at,
            notes: None,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn load_progress(&self, user_id: Uuid) -> Result<Vec<WorkoutProgress>> {
        let progress = self.progress_by_user.read().await;
        Ok(progress.get(&user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExercisePool;
    use crate::profile::sample_draft;
    use crate::synthesizer::PlanSynthesizer;

    fn plan() -> WorkoutPlan {
        let profile = sample_draft().validate().unwrap();
        PlanSynthesizer::offline(ExercisePool::built_in()).synthesize_deterministic(&profile)
    }

    #[tokio::test]
    async fn test_save_plan_assigns_id() {
        let store = InMemoryPlanStore::new();
        let user = Uuid::new_v4();

        let draft = plan();
        let saved = store.save_plan(user, draft.clone()).await.unwrap();

        assert_ne!(saved.id, draft.id);
        assert!(Uuid::parse_str(&saved.id).is_ok());
        assert_eq!(saved.days, draft.days);
    }

    #[tokio::test]
    async fn test_current_plan_is_newest() {
        let store = InMemoryPlanStore::new();
        let user = Uuid::new_v4();

        assert!(store.current_plan(user).await.unwrap().is_none());

        let first = store.save_plan(user, plan()).await.unwrap();
        let second = store.save_plan(user, plan()).await.unwrap();

        let listed: Vec<String> = store
            .list_plans(user)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(listed, vec![second.id.clone(), first.id]);
        assert_eq!(store.current_plan(user).await.unwrap().unwrap().id, second.id);
        assert!(store.list_plans(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_progress_upserts() {
        let store = InMemoryPlanStore::new();
        let user = Uuid::new_v4();

        let done = store.set_progress(user, "p1", 1, "pushup", true).await.unwrap();
        assert!(done.completed_at.is_some());

        let undone = store.set_progress(user, "p1", 1, "pushup", false).await.unwrap();
        assert_eq!(undone.progress_id, done.progress_id);
        assert!(undone.completed_at.is_none());

        store.set_progress(user, "p1", 2, "pushup", true).await.unwrap();

        let all = store.load_progress(user).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_profile_upsert_replaces() {
        let store = InMemoryPlanStore::new();
        let user = Uuid::new_v4();
        let mut profile = sample_draft().validate().unwrap();

        store.upsert_profile(user, profile.clone()).await.unwrap();
        profile.available_days = 5;
        store.upsert_profile(user, profile).await.unwrap();

        let loaded = store.load_profile(user).await.unwrap().unwrap();
        assert_eq!(loaded.available_days, 5);
    }
}
