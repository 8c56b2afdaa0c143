//! Workout Coach
//!
//! Turns a fitness assessment into a multi-week workout plan:
//! - Validates the assessment before any work is done
//! - Asks a generative model for a plan, once, best effort
//! - Falls back to rule-based synthesis from a static exercise catalog
//! - Stores profiles, plans and per-exercise progress
//!
//! FLOW:
//! ASSESS → VALIDATE → PROVIDER? → FALLBACK → STORE

pub mod api;
pub mod catalog;
pub mod coach;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod profile;
pub mod provider;
pub mod state;
pub mod synthesizer;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use catalog::ExercisePool;
pub use profile::ProfileDraft;
pub use synthesizer::PlanSynthesizer;
