#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bank_api_rust::auth::{generate_jwt, Claims, Role};
use bank_api_rust::database::{DatabaseError, InsertOutcome, MemoryStore, Record, Store};
use bank_api_rust::policy::{Selection, UpdateClause};
use bank_api_rust::types::SqlValue;
use bank_api_rust::{app, AppState};

/// Router wired to an in-memory store, driven in-process
pub struct TestApp {
    router: Router,
    pub store: Arc<CountingStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(inner: Arc<dyn Store>) -> Self {
        let store = Arc::new(CountingStore::new(inner));
        let router = app(AppState::new(store.clone()));
        Self { router, store }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router call failed")?;

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body for {}", uri))?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, Some(token), Some(body)).await
    }
}

pub fn employee_token() -> String {
    token_for("1", Role::Employee)
}

pub fn customer_token(customer_id: &str) -> String {
    token_for(customer_id, Role::Customer)
}

pub fn token_for(sub: &str, role: Role) -> String {
    generate_jwt(&Claims::new(sub, role)).expect("test token")
}

pub fn error(message: &str) -> Value {
    json!({ "error": message })
}

pub fn affected(rows: u64) -> Value {
    json!({ "success": true, "affectedRows": rows })
}

/// Counts store calls so tests can assert a request never reached storage
pub struct CountingStore {
    inner: Arc<dyn Store>,
    calls: AtomicUsize,
}

impl CountingStore {
    fn new(inner: Arc<dyn Store>) -> Self {
        Self { inner, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn select(&self, table: &'static str, selection: &Selection) -> Result<Vec<Record>, DatabaseError> {
        self.tick();
        self.inner.select(table, selection).await
    }

    async fn insert(
        &self,
        table: &'static str,
        row: &[(&'static str, SqlValue)],
    ) -> Result<InsertOutcome, DatabaseError> {
        self.tick();
        self.inner.insert(table, row).await
    }

    async fn update(&self, table: &'static str, clause: &UpdateClause) -> Result<u64, DatabaseError> {
        self.tick();
        self.inner.update(table, clause).await
    }

    async fn delete(&self, table: &'static str, column: &'static str, value: &str) -> Result<u64, DatabaseError> {
        self.tick();
        self.inner.delete(table, column, value).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.inner.ping().await
    }
}

/// Every call fails, as if the database went away
pub struct BrokenStore;

#[async_trait]
impl Store for BrokenStore {
    async fn select(&self, _: &'static str, _: &Selection) -> Result<Vec<Record>, DatabaseError> {
        Err(DatabaseError::QueryError("connection reset".into()))
    }

    async fn insert(&self, _: &'static str, _: &[(&'static str, SqlValue)]) -> Result<InsertOutcome, DatabaseError> {
        Err(DatabaseError::QueryError("connection reset".into()))
    }

    async fn update(&self, _: &'static str, _: &UpdateClause) -> Result<u64, DatabaseError> {
        Err(DatabaseError::QueryError("connection reset".into()))
    }

    async fn delete(&self, _: &'static str, _: &'static str, _: &str) -> Result<u64, DatabaseError> {
        Err(DatabaseError::QueryError("connection reset".into()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::QueryError("connection reset".into()))
    }
}
