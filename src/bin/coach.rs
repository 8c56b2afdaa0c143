use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workout_coach::{
    catalog::ExercisePool, config::CoachConfig, profile::ProfileDraft,
    provider::provider_from_config, synthesizer::PlanSynthesizer,
};

/// Usage: coach [profile.json]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    dotenv::dotenv().ok();
    let config = CoachConfig::from_env()?;

    let draft = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "Reading assessment");
            serde_json::from_str::<ProfileDraft>(&std::fs::read_to_string(path)?)?
        }
        None => sample_draft(),
    };

    let synthesizer = PlanSynthesizer::new(provider_from_config(&config)?, ExercisePool::built_in());

    match synthesizer.synthesize_draft(&draft).await {
        Ok(plan) => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}

fn sample_draft() -> ProfileDraft {
    ProfileDraft {
        name: Some("Alex".to_string()),
        age: Some(32),
        gender: Some("other".to_string()),
        height: Some(175.0),
        weight: Some(72.0),
        body_type: Some("mesomorph".to_string()),
        fitness_goal: Some("muscle_gain".to_string()),
        fitness_level: Some("intermediate".to_string()),
        available_days: Some(4),
        preferred_duration: Some(60),
    }
}
