//! SQL text for the four statements the resource handler issues.
//!
//! Table and column names come from the static resource descriptors and are
//! backtick quoted. Every value is a `?` placeholder in `params`.

use crate::database::DatabaseError;
use crate::policy::{Selection, UpdateClause};
use crate::types::SqlValue;

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}

/// Quote SQL identifier to prevent injection
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

pub fn select(table: &str, selection: &Selection) -> SqlResult {
    match selection {
        Selection::All => SqlResult {
            query: format!("SELECT * FROM {}", quote_identifier(table)),
            params: vec![],
        },
        Selection::Column { column, value } => SqlResult {
            query: format!(
                "SELECT * FROM {} WHERE {} = ?",
                quote_identifier(table),
                quote_identifier(column)
            ),
            params: vec![SqlValue::from(value.as_str())],
        },
    }
}

pub fn insert(table: &str, row: &[(&'static str, SqlValue)]) -> Result<SqlResult, DatabaseError> {
    if row.is_empty() {
        return Err(DatabaseError::QueryError(format!("insert into {} without columns", table)));
    }

    let columns: Vec<String> = row.iter().map(|(c, _)| quote_identifier(c)).collect();
    let placeholders = vec!["?"; row.len()].join(", ");

    Ok(SqlResult {
        query: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table),
            columns.join(", "),
            placeholders
        ),
        params: row.iter().map(|(_, v)| v.clone()).collect(),
    })
}

/// Refuses an unrestricted update
pub fn update(table: &str, clause: &UpdateClause) -> Result<SqlResult, DatabaseError> {
    let selector = clause
        .selector()
        .ok_or_else(|| DatabaseError::QueryError(format!("update of {} without a selector", table)))?;

    Ok(SqlResult {
        query: format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quote_identifier(table),
            clause.assignments().join(", "),
            quote_identifier(selector)
        ),
        params: clause.values().to_vec(),
    })
}

pub fn delete(table: &str, column: &str, value: &str) -> SqlResult {
    SqlResult {
        query: format!(
            "DELETE FROM {} WHERE {} = ?",
            quote_identifier(table),
            quote_identifier(column)
        ),
        params: vec![SqlValue::from(value)],
    }
}
