//! Assessment drafts and profile validation
//!
//! The assessment flow fills a [`ProfileDraft`] one step at a time.
//! Nothing downstream accepts a draft until every required field is usable.

use crate::error::CoachError;
use crate::models::{BodyType, FitnessGoal, FitnessLevel, Gender, UserProfile};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Required profile fields, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "name",
    "age",
    "gender",
    "height",
    "weight",
    "body_type",
    "fitness_goal",
    "fitness_level",
    "available_days",
    "preferred_duration",
];

pub const MIN_AGE: u32 = 13;
pub const MAX_AGE: u32 = 100;
pub const MAX_AVAILABLE_DAYS: u32 = 7;

/// Partially-collected assessment answers.
///
/// Enumerated answers stay as text so an unknown value is reported
/// alongside missing ones instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub body_type: Option<String>,
    pub fitness_goal: Option<String>,
    pub fitness_level: Option<String>,
    pub available_days: Option<u32>,
    pub preferred_duration: Option<u32>,
}

impl ProfileDraft {
    /// Check every required field and build the profile.
    ///
    /// Absent, blank, NaN, non-positive and out-of-range values all count as
    /// not filled in; the error lists each offending field once, prettified.
    pub fn validate(&self) -> Result<UserProfile> {
        let mut missing: Vec<&str> = Vec::new();

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if name.is_none() {
            missing.push("name");
        }

        let age = self.age.filter(|a| (MIN_AGE..=MAX_AGE).contains(a));
        if age.is_none() {
            missing.push("age");
        }

        let gender: Option<Gender> = parse_choice(self.gender.as_deref());
        if gender.is_none() {
            missing.push("gender");
        }

        let height = self.height.filter(|h| h.is_finite() && *h > 0.0);
        if height.is_none() {
            missing.push("height");
        }

        let weight = self.weight.filter(|w| w.is_finite() && *w > 0.0);
        if weight.is_none() {
            missing.push("weight");
        }

        let body_type: Option<BodyType> = parse_choice(self.body_type.as_deref());
        if body_type.is_none() {
            missing.push("body_type");
        }

        let fitness_goal: Option<FitnessGoal> = parse_choice(self.fitness_goal.as_deref());
        if fitness_goal.is_none() {
            missing.push("fitness_goal");
        }

        let fitness_level: Option<FitnessLevel> = parse_choice(self.fitness_level.as_deref());
        if fitness_level.is_none() {
            missing.push("fitness_level");
        }

        let available_days = self
            .available_days
            .filter(|d| (1..=MAX_AVAILABLE_DAYS).contains(d));
        if available_days.is_none() {
            missing.push("available_days");
        }

        let preferred_duration = self.preferred_duration.filter(|d| *d > 0);
        if preferred_duration.is_none() {
            missing.push("preferred_duration");
        }

        match (
            name,
            age,
            gender,
            height,
            weight,
            body_type,
            fitness_goal,
            fitness_level,
            available_days,
            preferred_duration,
        ) {
            (
                Some(name),
                Some(age),
                Some(gender),
                Some(height),
                Some(weight),
                Some(body_type),
                Some(fitness_goal),
                Some(fitness_level),
                Some(available_days),
                Some(preferred_duration),
            ) => Ok(UserProfile {
                name: name.to_string(),
                age,
                gender,
                height,
                weight,
                body_type,
                fitness_goal,
                fitness_level,
                available_days,
                preferred_duration,
            }),
            _ => Err(CoachError::InvalidProfile {
                fields: missing.into_iter().map(prettify_field_name).collect(),
            }),
        }
    }
}

impl From<&UserProfile> for ProfileDraft {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            age: Some(profile.age),
            gender: Some(profile.gender.to_string()),
            height: Some(profile.height),
            weight: Some(profile.weight),
            body_type: Some(profile.body_type.to_string()),
            fitness_goal: Some(profile.fitness_goal.to_string()),
            fitness_level: Some(profile.fitness_level.to_string()),
            available_days: Some(profile.available_days),
            preferred_duration: Some(profile.preferred_duration),
        }
    }
}

impl UserProfile {
    /// Re-run draft validation on an already-built profile.
    /// Profiles are plain data and may have been assembled by hand.
    pub fn validate(&self) -> Result<()> {
        ProfileDraft::from(self).validate().map(|_| ())
    }
}

fn parse_choice<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

/// `available_days` → `Available Days`
pub fn prettify_field_name(field: &str) -> String {
    field
        .split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A fully-answered assessment shared by tests across the crate.
#[cfg(test)]
pub(crate) fn sample_draft() -> ProfileDraft {
    ProfileDraft {
        name: Some("Sam".to_string()),
        age: Some(29),
        gender: Some("female".to_string()),
        height: Some(168.0),
        weight: Some(61.5),
        body_type: Some("ectomorph".to_string()),
        fitness_goal: Some("fat_loss".to_string()),
        fitness_level: Some("beginner".to_string()),
        available_days: Some(3),
        preferred_duration: Some(45),
    }
}
