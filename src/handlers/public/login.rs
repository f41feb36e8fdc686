// handlers/public/login.rs - POST /api/login
//
// Employees are checked first, then customers. The first table holding the
// email decides the outcome; a wrong password there is not retried elsewhere.

use axum::{body::Bytes, extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth::{self, Claims, Role};
use crate::error::ApiError;
use crate::handlers::body_fields;
use crate::policy::Selection;
use crate::resources::{Resource, CUSTOMERS, EMPLOYEES};

const INVALID: &str = "Invalid credentials";

/// POST /api/login - exchange email and password for a bearer token
pub async fn login_post(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    let fields = body_fields(&body)?;
    let email = fields.text("email");
    let password = fields.text("password");

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::unauthorized(INVALID));
    }

    let candidates: [(&'static Resource, Role); 2] = [(&EMPLOYEES, Role::Employee), (&CUSTOMERS, Role::Customer)];

    for (resource, role) in candidates {
        let selection = Selection::Column { column: "email", value: email.clone() };
        let rows = state.store.select(resource.table, &selection).await.map_err(|e| {
            tracing::error!("Error logging in {}: {}", resource.name, e);
            ApiError::database_error()
        })?;

        let Some(row) = rows.into_iter().next() else {
            continue;
        };

        let hash = row.get("password").and_then(Value::as_str).unwrap_or_default().to_string();
        if !verify(password.clone(), hash).await {
            tracing::info!("Failed login for {} {}", resource.name, email);
            return Err(ApiError::unauthorized(INVALID));
        }

        let subject = match row.get(resource.primary_key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(ApiError::unauthorized(INVALID)),
        };

        let token = auth::generate_jwt(&Claims::new(subject, role)).map_err(|e| {
            tracing::error!("Error signing token: {}", e);
            ApiError::InternalServerError("Token generation failed.".to_string())
        })?;

        return Ok(Json(json!({ "token": token, "role": role })));
    }

    Err(ApiError::unauthorized(INVALID))
}

/// bcrypt is CPU bound; keep it off the async workers
async fn verify(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || auth::verify_password(&password, &hash))
        .await
        .unwrap_or(false)
}
