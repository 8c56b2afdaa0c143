//! REST API Server for the workout coach
//!
//! Exposes assessment, plan and progress operations over HTTP.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::coach::{day_completion, Coach};
use crate::error::CoachError;
use crate::profile::ProfileDraft;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssessmentRequest {
    pub user_id: Option<String>,
    pub profile: ProfileDraft,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProgressRequest {
    pub user_id: String,
    pub plan_id: Option<String>,
    pub day: u32,
    pub exercise_id: String,
    pub completed: bool,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                data: Some(value),
                error: None,
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                Self::error(format!("Failed to serialize response: {}", e))
            }
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

type ApiResult = (StatusCode, Json<ApiResponse>);

fn ok<T: Serialize>(data: T) -> ApiResult {
    let response = ApiResponse::success(data);
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(response))
}

fn failure(err: CoachError) -> ApiResult {
    let status = match &err {
        CoachError::InvalidProfile { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CoachError::PlanNotFound(_) => StatusCode::NOT_FOUND,
        _ => {
            error!("Request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub coach: Arc<Coach>,
}

/// =============================
/// Helpers: User Ids
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

fn parse_or_stable_uuid(value: Option<&str>, fallback_seed: &str) -> uuid::Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            uuid::Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => stable_uuid_from_string(fallback_seed),
    }
}

/// =============================
/// Health & Catalog
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn catalog(State(state): State<ApiState>) -> ApiResult {
    ok(state.coach.synthesizer().pool().exercises())
}

/// =============================
/// Plans
/// =============================

async fn generate_plan(
    State(state): State<ApiState>,
    Json(draft): Json<ProfileDraft>,
) -> ApiResult {
    match state.coach.synthesizer().synthesize_draft(&draft).await {
        Ok(plan) => ok(plan),
        Err(e) => failure(e),
    }
}

async fn run_assessment(
    State(state): State<ApiState>,
    Json(req): Json<AssessmentRequest>,
) -> ApiResult {
    let user_id = parse_or_stable_uuid(req.user_id.as_deref(), "anonymous-user");
    info!(user_id = %user_id, "Received assessment");

    match state.coach.complete_assessment(user_id, &req.profile).await {
        Ok(result) => ok(result),
        Err(e) => failure(e),
    }
}

async fn list_plans(State(state): State<ApiState>, Path(user_id): Path<String>) -> ApiResult {
    let user_id = parse_or_stable_uuid(Some(user_id.as_str()), "anonymous-user");

    match state.coach.store().list_plans(user_id).await {
        Ok(plans) => ok(plans),
        Err(e) => failure(e),
    }
}

async fn current_plan(State(state): State<ApiState>, Path(user_id): Path<String>) -> ApiResult {
    let user_id = parse_or_stable_uuid(Some(user_id.as_str()), "anonymous-user");

    match state.coach.store().current_plan(user_id).await {
        Ok(Some(plan)) => ok(plan),
        Ok(None) => failure(CoachError::PlanNotFound(format!("user {}", user_id))),
        Err(e) => failure(e),
    }
}

/// =============================
/// Progress
/// =============================

async fn list_progress(State(state): State<ApiState>, Path(user_id): Path<String>) -> ApiResult {
    let user_id = parse_or_stable_uuid(Some(user_id.as_str()), "anonymous-user");

    match state.coach.store().load_progress(user_id).await {
        Ok(progress) => ok(progress),
        Err(e) => failure(e),
    }
}

async fn update_progress(
    State(state): State<ApiState>,
    Json(req): Json<ProgressRequest>,
) -> ApiResult {
    let user_id = parse_or_stable_uuid(Some(req.user_id.as_str()), "anonymous-user");

    let entry = match state
        .coach
        .update_progress(
            user_id,
            req.plan_id.as_deref(),
            req.day,
            &req.exercise_id,
            req.completed,
        )
        .await
    {
        Ok(entry) => entry,
        Err(e) => return failure(e),
    };

    // Completion for the day the toggle belongs to, when the plan is still stored.
    let store = state.coach.store();
    let day_percent = match (store.list_plans(user_id).await, store.load_progress(user_id).await) {
        (Ok(plans), Ok(progress)) => plans
            .iter()
            .find(|p| p.id == entry.plan_id)
            .map(|plan| day_completion(plan, entry.day, &progress)),
        _ => None,
    };

    ok(serde_json::json!({
        "progress": entry,
        "day_completion": day_percent,
    }))
}

/// =============================
/// Router
/// =============================

pub fn create_router(coach: Arc<Coach>) -> Router {
    let state = ApiState { coach };

    Router::new()
        .route("/health", get(health))
        .route("/api/catalog", get(catalog))
        .route("/api/plans/generate", post(generate_plan))
        .route("/api/assessment", post(run_assessment))
        .route("/api/users/:user_id/plans", get(list_plans))
        .route("/api/users/:user_id/plans/current", get(current_plan))
        .route("/api/users/:user_id/progress", get(list_progress))
        .route("/api/progress", post(update_progress))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    coach: Arc<Coach>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(coach);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
