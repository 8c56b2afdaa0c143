//! Core data models for the workout coach

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Ectomorph,
    Mesomorph,
    Endomorph,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    FatLoss,
    MuscleGain,
    Strength,
    Endurance,
    Flexibility,
}

/// Training level of a user, and the difficulty tier of an exercise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    #[serde(alias = "Beginner")]
    Beginner,
    #[serde(alias = "Intermediate")]
    Intermediate,
    #[serde(alias = "Advanced")]
    Advanced,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Ectomorph => "ectomorph",
            BodyType::Mesomorph => "mesomorph",
            BodyType::Endomorph => "endomorph",
        }
    }
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::FatLoss => "fat_loss",
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::Strength => "strength",
            FitnessGoal::Endurance => "endurance",
            FitnessGoal::Flexibility => "flexibility",
        }
    }

    /// Four training themes, cycled over the days of a plan.
    pub fn focus_cycle(&self) -> [&'static str; 4] {
        match self {
            FitnessGoal::FatLoss => ["Full Body", "Upper Body", "Lower Body", "Core"],
            FitnessGoal::MuscleGain => [
                "Chest & Triceps",
                "Back & Biceps",
                "Legs",
                "Shoulders & Arms",
            ],
            FitnessGoal::Strength => ["Push", "Pull", "Legs", "Full Body"],
            FitnessGoal::Endurance => ["Cardio", "HIIT", "Circuit", "Recovery"],
            FitnessGoal::Flexibility => [
                "Dynamic Stretch",
                "Static Stretch",
                "Mobility",
                "Recovery",
            ],
        }
    }
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

impl FromStr for BodyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ectomorph" => Ok(BodyType::Ectomorph),
            "mesomorph" => Ok(BodyType::Mesomorph),
            "endomorph" => Ok(BodyType::Endomorph),
            other => Err(format!("unknown body type: {}", other)),
        }
    }
}

impl FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fat_loss" => Ok(FitnessGoal::FatLoss),
            "muscle_gain" => Ok(FitnessGoal::MuscleGain),
            "strength" => Ok(FitnessGoal::Strength),
            "endurance" => Ok(FitnessGoal::Endurance),
            "flexibility" => Ok(FitnessGoal::Flexibility),
            other => Err(format!("unknown fitness goal: {}", other)),
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(format!("unknown fitness level: {}", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//
// ================= Profile =================
//

/// A complete, validated assessment. Build one through
/// [`crate::profile::ProfileDraft::validate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Centimeters
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    pub body_type: BodyType,
    pub fitness_goal: FitnessGoal,
    pub fitness_level: FitnessLevel,
    pub available_days: u32,
    /// Minutes per session
    pub preferred_duration: u32,
}

//
// ================= Exercises & Plans =================
//

/// Provider plans are decoded leniently: a leaf of the wrong type falls back
/// to its default instead of failing the whole plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub sets: u32,
    /// Free-form: "15", "30s"
    #[serde(default, deserialize_with = "string_or_number")]
    pub reps: String,
    /// Seconds
    #[serde(default, deserialize_with = "lenient_count")]
    pub rest_time: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub muscle_groups: Vec<String>,
    /// Empty means no equipment needed
    #[serde(default, deserialize_with = "lenient_seq")]
    pub equipment: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: FitnessLevel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
    /// 1-based
    #[serde(default, deserialize_with = "lenient_count")]
    pub day: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub focus: String,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_count")]
    pub duration: u32,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub warmup: Vec<Exercise>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub exercises: Vec<Exercise>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub cooldown: Vec<Exercise>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Placeholder until the plan store assigns the authoritative id
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_weeks: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub days_per_week: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub estimated_duration: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub days: Vec<WorkoutDay>,
}

impl WorkoutPlan {
    pub fn day(&self, day: u32) -> Option<&WorkoutDay> {
        self.days.iter().find(|d| d.day == day)
    }
}

//
// ================= Progress =================
//

/// Completion flag for one exercise on one day of a stored plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutProgress {
    pub progress_id: Uuid,
    pub user_id: Uuid,
    pub plan_id: String,
    pub day: u32,
    pub exercise_id: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

//
// ================= Lenient decoding =================
//

/// Any value of the wrong type becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Arrays keep their length; elements of the wrong shape become defaults.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// Counts arrive as `3`, `3.0`, `"3-4"` or `"Day 1"`; the first whole number wins.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or_default(),
        Value::String(s) => leading_count(&s).unwrap_or_default(),
        _ => 0,
    })
}

fn leading_count(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Model output often writes reps as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&FitnessGoal::MuscleGain).unwrap(),
            "\"muscle_gain\""
        );
        assert_eq!("Fat_Loss".parse::<FitnessGoal>(), Ok(FitnessGoal::FatLoss));
        assert!("yoga".parse::<FitnessGoal>().is_err());
        assert_eq!(
            serde_json::from_str::<FitnessLevel>("\"Advanced\"").unwrap(),
            FitnessLevel::Advanced
        );
    }

    #[test]
    fn test_exercise_accepts_numeric_reps_and_missing_fields() {
        let exercise: Exercise = serde_json::from_str(
            r#"{"id":"row","name":"Rows","category":"strength","sets":4,"reps":12,"restTime":90}"#,
        )
        .unwrap();

        assert_eq!(exercise.reps, "12");
        assert_eq!(exercise.rest_time, 90);
        assert!(exercise.equipment.is_empty());
        assert_eq!(exercise.difficulty, FitnessLevel::Beginner);
    }

    #[test]
    fn test_plan_uses_camel_case_fields() {
        let plan = WorkoutPlan {
            id: "p".into(),
            name: "Plan".into(),
            description: String::new(),
            total_weeks: 4,
            days_per_week: 3,
            estimated_duration: 45,
            difficulty: "beginner".into(),
            days: vec![],
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["totalWeeks"], 4);
        assert_eq!(json["daysPerWeek"], 3);
        assert_eq!(json["estimatedDuration"], 45);
    }

    #[test]
    fn test_mistyped_leaves_fall_back_to_defaults() {
        let day: WorkoutDay = serde_json::from_str(
            r#"{"day":"Day 2","name":"Tuesday","exercises":[
                {"id":"s","name":"Squats","difficulty":"all levels","sets":"3-4","restTime":null},
                "burpees"
            ]}"#,
        )
        .unwrap();

        assert_eq!(day.day, 2);
        assert_eq!(day.duration, 0);
        assert!(day.focus.is_empty());
        assert_eq!(day.exercises.len(), 2);
        assert_eq!(day.exercises[0].difficulty, FitnessLevel::Beginner);
        assert_eq!(day.exercises[0].sets, 3);
        assert_eq!(day.exercises[0].rest_time, 0);
        assert_eq!(day.exercises[1], Exercise::default());
    }

    #[test]
    fn test_leading_count() {
        assert_eq!(leading_count("Day 12"), Some(12));
        assert_eq!(leading_count("8-12"), Some(8));
        assert_eq!(leading_count("rest"), None);
    }
}
