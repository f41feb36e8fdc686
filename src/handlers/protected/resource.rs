//! Generic GET/POST/PUT/DELETE for every `/api/secure/{collection}` route.
//!
//! Each handler is parameterized by a static [`Resource`] and does the same
//! steps: role check, sanitize, resolve or validate, exactly one store call,
//! shape the response. Storage failures are logged with the resource and
//! operation and surface as `500 Database error.`.

use std::collections::HashMap;

use axum::{body::Bytes, http::StatusCode, response::Json};
use serde_json::{json, Map, Value};

use crate::app::AppState;
use crate::auth::hash_password;
use crate::config;
use crate::database::{DatabaseError, Record};
use crate::error::ApiError;
use crate::handlers::body_fields;
use crate::middleware::AuthUser;
use crate::policy::{EmptyPatch, Rejected, Selection, SelectorRule, UpdateClause};
use crate::resources::{FieldKind, OnEmpty, Resource};
use crate::sanitize::Fields;
use crate::types::{Operation, SqlValue};

pub type ResourceResult = Result<(StatusCode, Json<Value>), ApiError>;

/// Sanitized coalesced values of the rule's selector fields
fn candidates(rule: &SelectorRule, fields: &Fields) -> HashMap<&'static str, String> {
    rule.fields.iter().map(|f| (*f, fields.text(f))).collect()
}

fn resolve(rule: &SelectorRule, fields: &Fields) -> Result<Selection, ApiError> {
    rule.resolve(&candidates(rule, fields))
        .map_err(|Rejected(message)| ApiError::bad_request(message))
}

/// Single-column target for writes
fn target(resource: &Resource, selection: Selection) -> Result<(&'static str, String), ApiError> {
    match selection {
        Selection::Column { column, value } => Ok((column, value)),
        Selection::All => Err(ApiError::bad_request(format!("{} is required.", resource.primary_key))),
    }
}

fn storage_error(resource: &Resource, operation: Operation, err: DatabaseError) -> ApiError {
    tracing::error!("Error {} {}: {}", operation.verb(), resource.log_label(operation), err);
    ApiError::database_error()
}

/// Drop columns never returned to clients
pub fn visible(resource: &Resource, mut row: Record) -> Value {
    for column in resource.hidden {
        row.remove(*column);
    }
    Value::Object(row)
}

/// GET - rows selected by the query string
pub async fn list(
    resource: &'static Resource,
    state: AppState,
    user: AuthUser,
    query: HashMap<String, String>,
) -> ResourceResult {
    user.require(resource.role)?;

    let fields = Fields::from_query(query);
    let selection = resolve(&resource.list, &fields)?;

    let rows = state
        .store
        .select(resource.table, &selection)
        .await
        .map_err(|e| storage_error(resource, Operation::List, e))?;

    if rows.is_empty() && resource.on_empty == OnEmpty::NotFound {
        return Err(ApiError::not_found());
    }

    let mut body = Map::new();
    body.insert(
        resource.collection.to_string(),
        Value::Array(rows.into_iter().map(|row| visible(resource, row)).collect()),
    );
    Ok((StatusCode::OK, Json(Value::Object(body))))
}

/// POST - insert one row after the required-field checks
pub async fn create(resource: &'static Resource, state: AppState, user: AuthUser, body: Bytes) -> ResourceResult {
    user.require(resource.role)?;
    let fields = body_fields(&body)?;

    let checked: Option<Vec<_>> = resource
        .create
        .fields
        .iter()
        .map(|field| field.read(&fields).map(|value| (field, value)))
        .collect();
    let checked = checked.ok_or_else(|| ApiError::bad_request(resource.create.message))?;

    let mut row = Vec::with_capacity(checked.len());
    for (field, value) in checked {
        let value = match (field.kind, value) {
            (FieldKind::Password, SqlValue::Text(plain)) => SqlValue::Text(hash(resource, plain).await?),
            (_, value) => value,
        };
        row.push((field.name, value));
    }

    let outcome = state
        .store
        .insert(resource.table, &row)
        .await
        .map_err(|e| storage_error(resource, Operation::Create, e))?;

    // Caller-supplied keys are echoed back when storage generated none
    let id = match outcome.generated_id {
        Some(id) => Value::from(id),
        None => row
            .iter()
            .find(|(name, _)| *name == resource.primary_key)
            .map(|(_, value)| value.to_json())
            .unwrap_or(Value::Null),
    };

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(resource.primary_key.to_string(), id);
    Ok((StatusCode::CREATED, Json(Value::Object(body))))
}

/// PUT - patch the supplied fields of the selected rows
pub async fn update(resource: &'static Resource, state: AppState, user: AuthUser, body: Bytes) -> ResourceResult {
    user.require(resource.role)?;
    let fields = body_fields(&body)?;

    let selection = resolve(&resource.update, &fields)?;
    let clause = UpdateClause::build(resource.patch.iter().map(|f| (f.name, f.read(&fields))))
        .map_err(|EmptyPatch| ApiError::bad_request(EmptyPatch::MESSAGE))?;
    let (column, value) = target(resource, selection)?;
    let clause = clause.restrict_to(column, value);

    let affected = state
        .store
        .update(resource.table, &clause)
        .await
        .map_err(|e| storage_error(resource, Operation::Update, e))?;

    Ok((StatusCode::OK, Json(json!({ "success": true, "affectedRows": affected }))))
}

/// DELETE - remove the selected rows; repeating it affects zero rows
pub async fn delete(resource: &'static Resource, state: AppState, user: AuthUser, body: Bytes) -> ResourceResult {
    user.require(resource.role)?;
    let fields = body_fields(&body)?;

    let selection = resolve(&resource.delete, &fields)?;
    let (column, value) = target(resource, selection)?;

    let affected = state
        .store
        .delete(resource.table, column, &value)
        .await
        .map_err(|e| storage_error(resource, Operation::Delete, e))?;

    Ok((StatusCode::OK, Json(json!({ "success": true, "affectedRows": affected }))))
}

async fn hash(resource: &Resource, plain: String) -> Result<String, ApiError> {
    let cost = config::config().security.bcrypt_cost;
    tokio::task::spawn_blocking(move || hash_password(&plain, cost))
        .await
        .map_err(|e| e.to_string())
        .and_then(|hashed| hashed.map_err(|e| e.to_string()))
        .map_err(|e| {
            tracing::error!("Error {} {}: {}", Operation::Create.verb(), resource.name, e);
            ApiError::database_error()
        })
}
