use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workout_coach::{
    api::start_server, catalog::ExercisePool, coach::Coach, config::CoachConfig,
    provider::provider_from_config, state::InMemoryPlanStore, synthesizer::PlanSynthesizer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = CoachConfig::from_env()?;

    info!("Workout Coach - API Server");
    info!("Port: {}", config.port);

    // Create components
    let provider = provider_from_config(&config)?;
    let synthesizer = PlanSynthesizer::new(provider, ExercisePool::built_in());
    let store = Box::new(InMemoryPlanStore::new());

    let coach = Arc::new(Coach::new(synthesizer, store));

    info!("Coach initialized");

    start_server(coach, config.port).await?;

    Ok(())
}
