use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::database::DatabaseError;
use crate::policy::{Selection, UpdateClause};
use crate::types::SqlValue;

/// One row as a JSON object keyed by column name
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Auto-increment id, `None` when the caller supplied the key
    pub generated_id: Option<u64>,
}

/// Storage collaborator. Every handler makes exactly one of these calls.
#[async_trait]
pub trait Store: Send + Sync {
    async fn select(&self, table: &'static str, selection: &Selection) -> Result<Vec<Record>, DatabaseError>;

    async fn insert(
        &self,
        table: &'static str,
        row: &[(&'static str, SqlValue)],
    ) -> Result<InsertOutcome, DatabaseError>;

    /// Returns the number of affected rows
    async fn update(&self, table: &'static str, clause: &UpdateClause) -> Result<u64, DatabaseError>;

    /// Returns the number of affected rows
    async fn delete(&self, table: &'static str, column: &'static str, value: &str) -> Result<u64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
