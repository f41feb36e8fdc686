/// Shared types used across the codebase

use serde_json::Value;

/// Resource operations supported by every protected route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Verb used in log lines ("Error updating account(s): ...")
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::List => "getting",
            Operation::Create => "adding",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
        }
    }
}

/// A value bound to a `?` placeholder. Values are never interpolated into SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Float(f64),
    Int(i64),
}

impl SqlValue {
    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Text(s) => Value::String(s.clone()),
            SqlValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SqlValue::Int(i) => Value::Number((*i).into()),
        }
    }

    /// JS truthiness of the bound value
    pub fn is_truthy(&self) -> bool {
        match self {
            SqlValue::Null => false,
            SqlValue::Text(s) => !s.is_empty(),
            SqlValue::Float(f) => *f != 0.0 && !f.is_nan(),
            SqlValue::Int(i) => *i != 0,
        }
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_js() {
        assert!(!SqlValue::Null.is_truthy());
        assert!(!SqlValue::Text(String::new()).is_truthy());
        assert!(!SqlValue::Float(0.0).is_truthy());
        assert!(!SqlValue::Int(0).is_truthy());
        assert!(SqlValue::Text("0".into()).is_truthy());
        assert!(SqlValue::Float(0.5).is_truthy());
    }

    #[test]
    fn converts_to_json() {
        assert_eq!(SqlValue::Float(12.5).to_json(), json!(12.5));
        assert_eq!(SqlValue::Int(3).to_json(), json!(3));
        assert_eq!(SqlValue::from("x").to_json(), json!("x"));
        assert_eq!(SqlValue::Null.to_json(), Value::Null);
    }
}
