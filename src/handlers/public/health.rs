use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /health - storage connectivity check
pub async fn health_get(State(state): State<AppState>) -> Result<(StatusCode, Json<Value>), ApiError> {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        )),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Database unavailable."))
        }
    }
}
