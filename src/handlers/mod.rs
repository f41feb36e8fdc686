// handlers/mod.rs - Handler tiers
//
// Public (no auth): login, health
// Protected (JWT auth): /api/secure/* resources and the customer portal

pub mod protected;
pub mod public;

use axum::body::Bytes;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::sanitize::Fields;

/// JSON object body. An empty body reads as `{}`.
pub(crate) fn body_fields(body: &Bytes) -> Result<Fields, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::default());
    }
    serde_json::from_slice::<Map<String, Value>>(body)
        .map(Fields::from_body)
        .map_err(|e| ApiError::invalid_json(format!("Invalid JSON body: {}", e)))
}
