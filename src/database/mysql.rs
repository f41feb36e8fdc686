use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, MySql, Row};

use crate::database::query_builder::{self, SqlResult};
use crate::database::{DatabaseError, InsertOutcome, Record, Store};
use crate::policy::{Selection, UpdateClause};
use crate::types::SqlValue;

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub async fn connect(url: &str, max_connections: u32, acquire_timeout: Duration) -> Result<Self, DatabaseError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    fn query(sql: &SqlResult) -> Query<'_, MySql, MySqlArguments> {
        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param(q, p);
        }
        q
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn select(&self, table: &'static str, selection: &Selection) -> Result<Vec<Record>, DatabaseError> {
        let sql = query_builder::select(table, selection);
        let rows = Self::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn insert(
        &self,
        table: &'static str,
        row: &[(&'static str, SqlValue)],
    ) -> Result<InsertOutcome, DatabaseError> {
        let sql = query_builder::insert(table, row)?;
        let result = Self::query(&sql).execute(&self.pool).await?;
        let id = result.last_insert_id();
        Ok(InsertOutcome {
            generated_id: (id != 0).then_some(id),
        })
    }

    async fn update(&self, table: &'static str, clause: &UpdateClause) -> Result<u64, DatabaseError> {
        let sql = query_builder::update(table, clause)?;
        let result = Self::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, table: &'static str, column: &'static str, value: &str) -> Result<u64, DatabaseError> {
        let sql = query_builder::delete(table, column, value);
        let result = Self::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_param<'q>(q: Query<'q, MySql, MySqlArguments>, v: &'q SqlValue) -> Query<'q, MySql, MySqlArguments> {
    match v {
        SqlValue::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        SqlValue::Text(s) => q.bind(s.as_str()),
        SqlValue::Float(f) => q.bind(*f),
        SqlValue::Int(i) => q.bind(*i),
    }
}

fn row_to_record(row: &MySqlRow) -> Record {
    let mut map = Record::new();
    for (i, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), decode_column(row, i));
    }
    map
}

/// DECIMAL columns come back as strings, dates as `YYYY-MM-DD`.
fn decode_column(row: &MySqlRow, i: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<String>, _>(i) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
        return v.map(|n| Value::Number(n.into())).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(i) {
        return v.map(|n| Value::Number(n.into())).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Decimal>, _>(i) {
        return v.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(i) {
        return v
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f32>, _>(i) {
        return v
            .and_then(|f| serde_json::Number::from_f64(f as f64))
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<NaiveDate>, _>(i) {
        return v
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<NaiveDateTime>, _>(i) {
        return v
            .map(|d| Value::String(d.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<DateTime<Utc>>, _>(i) {
        return v.map(|d| Value::String(d.to_rfc3339())).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(i) {
        return v.map(Value::Bool).unwrap_or(Value::Null);
    }
    Value::Null
}
