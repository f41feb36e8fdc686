use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::policy::Selection;
use crate::resources::ACCOUNTS;

use super::resource::visible;

/// GET /api/accounts - the calling customer's own accounts, as a bare array
pub async fn accounts_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    user.require(Some(Role::Customer))?;

    let selection = Selection::Column { column: "customer_id", value: user.id.clone() };
    let rows = state.store.select(ACCOUNTS.table, &selection).await.map_err(|e| {
        tracing::error!("Error getting accounts for customer {}: {}", user.id, e);
        ApiError::database_error()
    })?;

    Ok(Json(Value::Array(
        rows.into_iter().map(|row| visible(&ACCOUNTS, row)).collect(),
    )))
}
