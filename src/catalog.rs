//! Exercise catalog
//!
//! Read-only reference data. Every query preserves catalog-definition
//! order and an unmatched filter yields an empty list.

use crate::error::CoachError;
use crate::models::{Exercise, FitnessLevel};
use crate::Result;
use lazy_static::lazy_static;
use std::collections::HashSet;

pub const WARMUP: &str = "warmup";
pub const COOLDOWN: &str = "cooldown";

/// Categories that open and close a session rather than form its main work.
pub const BOOKEND_CATEGORIES: [&str; 2] = [WARMUP, COOLDOWN];

lazy_static! {
    static ref BUILT_IN_EXERCISES: Vec<Exercise> = vec![
        exercise(
            "pushup", "Push-ups", "strength", FitnessLevel::Beginner, 3, "15", 60,
            "Keep elbows at 45 degrees",
            &["chest", "triceps", "shoulders"], &[],
        ),
        exercise(
            "squat", "Bodyweight Squats", "strength", FitnessLevel::Beginner, 3, "20", 60,
            "Keep back straight",
            &["quadriceps", "hamstrings", "glutes"], &[],
        ),
        exercise(
            "plank", "Plank", "core", FitnessLevel::Beginner, 3, "30s", 60,
            "Hold for 30 seconds each",
            &["abs", "core", "shoulders"], &[],
        ),
        exercise(
            "jumping-jacks", "Jumping Jacks", WARMUP, FitnessLevel::Beginner, 2, "30", 30,
            "Light warm-up",
            &["full body"], &[],
        ),
        exercise(
            "stretching", "Stretching", COOLDOWN, FitnessLevel::Beginner, 1, "20s", 0,
            "Hold each stretch for 20 seconds",
            &["full body"], &[],
        ),
        exercise(
            "lunges", "Walking Lunges", "strength", FitnessLevel::Intermediate, 3, "12", 60,
            "Front knee stays over the ankle",
            &["quadriceps", "glutes"], &[],
        ),
        exercise(
            "mountain-climbers", "Mountain Climbers", "core", FitnessLevel::Intermediate, 3, "40s", 45,
            "Drive knees toward the chest, hips level",
            &["abs", "shoulders", "hip flexors"], &[],
        ),
        exercise(
            "burpees", "Burpees", "cardio", FitnessLevel::Intermediate, 3, "10", 60,
            "Land softly and keep a steady rhythm",
            &["full body"], &[],
        ),
        exercise(
            "pull-ups", "Pull-ups", "strength", FitnessLevel::Advanced, 4, "8", 90,
            "Full hang at the bottom, chin over the bar",
            &["lats", "biceps", "upper back"], &["pull-up bar"],
        ),
        exercise(
            "pistol-squat", "Pistol Squats", "strength", FitnessLevel::Advanced, 3, "6", 90,
            "Control the descent on one leg",
            &["quadriceps", "glutes", "core"], &[],
        ),
        exercise(
            "arm-circles", "Arm Circles", WARMUP, FitnessLevel::Beginner, 1, "30s", 15,
            "Small circles growing larger, both directions",
            &["shoulders"], &[],
        ),
        exercise(
            "high-knees", "High Knees", WARMUP, FitnessLevel::Intermediate, 2, "30s", 30,
            "Knees to hip height, stay on the balls of the feet",
            &["hip flexors", "calves"], &[],
        ),
        exercise(
            "leg-swings", "Leg Swings", WARMUP, FitnessLevel::Beginner, 1, "15", 15,
            "Hold a wall for balance",
            &["hamstrings", "hip flexors"], &[],
        ),
        exercise(
            "childs-pose", "Child's Pose", COOLDOWN, FitnessLevel::Beginner, 1, "45s", 0,
            "Breathe slowly into the lower back",
            &["lower back", "hips"], &[],
        ),
        exercise(
            "foam-rolling", "Foam Rolling", COOLDOWN, FitnessLevel::Beginner, 1, "60s", 0,
            "Pause on tight spots",
            &["full body"], &["foam roller"],
        ),
    ];
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: &str,
    name: &str,
    category: &str,
    difficulty: FitnessLevel,
    sets: u32,
    reps: &str,
    rest_time: u32,
    description: &str,
    muscle_groups: &[&str],
    equipment: &[&str],
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        sets,
        reps: reps.to_string(),
        rest_time,
        description: description.to_string(),
        muscle_groups: muscle_groups.iter().map(|m| m.to_string()).collect(),
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
        difficulty,
    }
}

/// Immutable, queryable exercise catalog.
#[derive(Debug, Clone)]
pub struct ExercisePool {
    exercises: Vec<Exercise>,
}

impl ExercisePool {
    /// Build a pool from custom reference data. Ids must be unique.
    pub fn new(exercises: Vec<Exercise>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(exercises.len());
        for exercise in &exercises {
            if !seen.insert(exercise.id.as_str()) {
                return Err(CoachError::DuplicateExercise(exercise.id.clone()));
            }
        }
        Ok(Self { exercises })
    }

    /// The catalog shipped with the crate.
    pub fn built_in() -> Self {
        Self {
            exercises: BUILT_IN_EXERCISES.clone(),
        }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn by_category(&self, category: &str) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }

    pub fn excluding_categories(&self, categories: &[&str]) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|e| !categories.contains(&e.category.as_str()))
            .cloned()
            .collect()
    }

    /// beginner: beginner only; intermediate: everything but advanced;
    /// advanced: everything.
    pub fn filter_by_difficulty(&self, level: FitnessLevel) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|e| admits(level, e.difficulty))
            .cloned()
            .collect()
    }

    /// Sub-pool restricted to what `level` may attempt.
    pub fn for_level(&self, level: FitnessLevel) -> ExercisePool {
        ExercisePool {
            exercises: self.filter_by_difficulty(level),
        }
    }
}

impl Default for ExercisePool {
    fn default() -> Self {
        Self::built_in()
    }
}

fn admits(level: FitnessLevel, difficulty: FitnessLevel) -> bool {
    match level {
        FitnessLevel::Beginner => difficulty == FitnessLevel::Beginner,
        FitnessLevel::Intermediate => difficulty != FitnessLevel::Advanced,
        FitnessLevel::Advanced => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(exercises: &[Exercise]) -> Vec<&str> {
        exercises.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_built_in_ids_are_unique() {
        let pool = ExercisePool::built_in();
        assert!(ExercisePool::new(pool.exercises().to_vec()).is_ok());
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let pool = ExercisePool::built_in();
        let mut exercises = pool.exercises().to_vec();
        exercises.push(exercises[0].clone());

        match ExercisePool::new(exercises) {
            Err(CoachError::DuplicateExercise(id)) => assert_eq!(id, "pushup"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_by_category_keeps_catalog_order() {
        let pool = ExercisePool::built_in();
        assert_eq!(
            ids(&pool.by_category(WARMUP)),
            vec!["jumping-jacks", "arm-circles", "high-knees", "leg-swings"]
        );
        assert!(pool.by_category("swimming").is_empty());
    }

    #[test]
    fn test_excluding_bookends() {
        let pool = ExercisePool::built_in();
        let main = pool.excluding_categories(&BOOKEND_CATEGORIES);
        assert!(main.iter().all(|e| e.category != WARMUP && e.category != COOLDOWN));
        assert_eq!(&ids(&main)[..3], &["pushup", "squat", "plank"]);
    }

    #[test]
    fn test_difficulty_policy() {
        let pool = ExercisePool::built_in();

        let beginner = pool.filter_by_difficulty(FitnessLevel::Beginner);
        assert!(beginner.iter().all(|e| e.difficulty == FitnessLevel::Beginner));

        let intermediate = pool.filter_by_difficulty(FitnessLevel::Intermediate);
        assert!(intermediate.iter().all(|e| e.difficulty != FitnessLevel::Advanced));
        assert!(intermediate.iter().any(|e| e.difficulty == FitnessLevel::Intermediate));

        let advanced = pool.filter_by_difficulty(FitnessLevel::Advanced);
        assert_eq!(advanced.len(), pool.len());
    }

    #[test]
    fn test_filter_is_repeatable() {
        let pool = ExercisePool::built_in();
        assert_eq!(
            pool.filter_by_difficulty(FitnessLevel::Beginner),
            pool.filter_by_difficulty(FitnessLevel::Beginner)
        );
    }

    #[test]
    fn test_empty_pool_queries() {
        let pool = ExercisePool::new(vec![]).unwrap();
        assert!(pool.filter_by_difficulty(FitnessLevel::Advanced).is_empty());
        assert!(pool.by_category(COOLDOWN).is_empty());
    }
}
