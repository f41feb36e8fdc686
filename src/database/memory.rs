//! In-memory tables for tests and `STORAGE_BACKEND=memory`.
//!
//! Mirrors the MySQL behaviour the handlers rely on: auto-increment primary
//! keys, string/number comparison in `WHERE col = ?`, NULL never matching.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::database::{DatabaseError, InsertOutcome, Record, Store};
use crate::policy::{Selection, UpdateClause};
use crate::resources;
use crate::types::SqlValue;

#[derive(Debug)]
struct Table {
    primary_key: &'static str,
    rows: Vec<Record>,
    next_id: u64,
}

impl Table {
    fn new(primary_key: &'static str) -> Self {
        Self { primary_key, rows: Vec::new(), next_id: 1 }
    }
}

pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    /// One empty table per resource
    pub fn new() -> Self {
        let tables = resources::ALL
            .iter()
            .map(|r| (r.table, Table::new(r.primary_key)))
            .collect();
        Self { tables: RwLock::new(tables) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown(table: &str) -> DatabaseError {
    DatabaseError::QueryError(format!("Table '{}' doesn't exist", table))
}

/// `col = ?` against a string parameter. Text columns compare as strings;
/// numeric columns convert the parameter to a number.
fn matches(stored: Option<&Value>, expected: &str) -> bool {
    match stored {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => match (n.as_f64(), expected.trim().parse::<f64>()) {
            (Some(a), Ok(b)) => a == b,
            _ => false,
        },
        Some(Value::Bool(b)) => expected == if *b { "1" } else { "0" },
        Some(_) => false,
    }
}

fn selected(row: &Record, selection: &Selection) -> bool {
    match selection {
        Selection::All => true,
        Selection::Column { column, value } => matches(row.get(*column), value),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, table: &'static str, selection: &Selection) -> Result<Vec<Record>, DatabaseError> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| unknown(table))?;
        Ok(table
            .rows
            .iter()
            .filter(|row| selected(row, selection))
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        table: &'static str,
        row: &[(&'static str, SqlValue)],
    ) -> Result<InsertOutcome, DatabaseError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| unknown(table))?;

        let mut record: Record = row
            .iter()
            .map(|(column, value)| (column.to_string(), value.to_json()))
            .collect();

        let supplied = record
            .get(table.primary_key)
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

        let generated_id = match supplied {
            Some(key) => {
                if table.rows.iter().any(|r| matches(r.get(table.primary_key), &key)) {
                    return Err(DatabaseError::QueryError(format!(
                        "Duplicate entry '{}' for key 'PRIMARY'",
                        key
                    )));
                }
                None
            }
            None => {
                let id = table.next_id;
                table.next_id += 1;
                record.insert(table.primary_key.to_string(), Value::Number(id.into()));
                Some(id)
            }
        };

        table.rows.push(record);
        Ok(InsertOutcome { generated_id })
    }

    async fn update(&self, table: &'static str, clause: &UpdateClause) -> Result<u64, DatabaseError> {
        let (column, value) = match (clause.selector(), clause.selector_value()) {
            (Some(column), Some(SqlValue::Text(value))) => (column, value.clone()),
            (Some(column), Some(other)) => (column, other.to_json().to_string()),
            _ => return Err(DatabaseError::QueryError(String::from("update without a selector"))),
        };

        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| unknown(table))?;

        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|r| matches(r.get(column), &value)) {
            for (col, v) in clause.patch() {
                row.insert(col.to_string(), v.to_json());
            }
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, table: &'static str, column: &'static str, value: &str) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| unknown(table))?;

        let before = table.rows.len();
        table.rows.retain(|r| !matches(r.get(column), value));
        Ok((before - table.rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
