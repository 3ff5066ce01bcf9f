//! Health check and database bootstrap handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::AppResult;

use crate::api::AppState;
use crate::services::ThreeKStatus;
use crate::types::ApiResponse;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    #[schema(example = "Database connected successfully")]
    pub message: String,
    /// Primary store clock
    pub timestamp: DateTime<Utc>,
    #[schema(example = "PostgreSQL")]
    pub database: String,
    pub three_k: ThreeKStatus,
}

/// `{success, message}` body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/admin/init-db", get(admin_probe).post(init_db))
}

/// Check primary store connectivity
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 500, description = "Database connection not available")
    )
)]
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let report = state.system_service.health().await?;

    Ok(Json(HealthResponse {
        success: true,
        message: "Database connected successfully".to_string(),
        timestamp: report.timestamp,
        database: report.database,
        three_k: report.three_k,
    }))
}

/// Create the schema if missing
#[utoipa::path(
    post,
    path = "/api/admin/init-db",
    tag = "System",
    responses(
        (status = 200, description = "Database initialized", body = MessageEnvelope),
        (status = 500, description = "Database error")
    )
)]
pub async fn init_db(State(state): State<AppState>) -> AppResult<Json<ApiResponse<()>>> {
    state.system_service.initialize().await?;
    Ok(Json(ApiResponse::message("Database initialized successfully")))
}

/// Liveness probe for the admin surface
#[utoipa::path(
    get,
    path = "/api/admin/init-db",
    tag = "System",
    responses((status = 200, description = "Admin endpoint is working", body = MessageEnvelope))
)]
pub async fn admin_probe() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Admin endpoint is working"))
}
