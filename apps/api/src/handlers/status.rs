//! Health endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub migrations_total: usize,
    pub migrations_applied: usize,
}

/// GET /api/health
///
/// Reports database reachability and applied migration count.
pub async fn health(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    if !state.db.health_check().await {
        return Err(crate::error::ApiError::Internal(
            "Database unreachable".to_string(),
        ));
    }
    let (total, applied) = shelf_db::migrations::migration_status(state.db.pool()).await?;

    Ok(Json(HealthResponse {
        status: "ok",
        database: "reachable",
        migrations_total: total,
        migrations_applied: applied,
    }))
}
