//! Inbound field sanitization.
//!
//! Every string that reaches a handler goes through [`clean`]: trimmed, then
//! stripped of all markup. [`Fields`] wraps a query map or JSON body and
//! reads values with the coercion rules the client API has always relied on:
//!
//! - `text`: falsy values (absent, null, false, 0, "") read as `""`
//! - `optional_text`: absent or null is `None`, anything else is cleaned text
//! - `number` / `optional_number`: float prefix parse of the cleaned text
//! - `optional_integer`: integer prefix parse of the raw value
//!
//! A numeric parse that finds no number yields `None`, the same as absent.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

/// Trim, then remove every tag. `script` and `style` contents are dropped.
pub fn clean(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(trimmed)
        .to_string()
}

/// Sanitizing reader over the fields of one request
#[derive(Debug, Clone, Default)]
pub struct Fields {
    values: Map<String, Value>,
}

impl Fields {
    pub fn from_query(query: HashMap<String, String>) -> Self {
        Self {
            values: query
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        }
    }

    pub fn from_body(body: Map<String, Value>) -> Self {
        Self { values: body }
    }

    /// Coalescing read: falsy values become the empty string.
    pub fn text(&self, name: &str) -> String {
        match self.values.get(name) {
            Some(v) if is_truthy(v) => clean(&render(v)),
            _ => String::new(),
        }
    }

    /// `None` when absent or null; otherwise the cleaned text, so `0` reads `"0"`.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        match self.values.get(name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(clean(&render(v))),
        }
    }

    /// Float parse of the coalesced text. A raw `0` coalesces to `""` and reads `None`.
    pub fn number(&self, name: &str) -> Option<f64> {
        parse_float(&self.text(name))
    }

    pub fn optional_number(&self, name: &str) -> Option<f64> {
        self.optional_text(name).and_then(|s| parse_float(&s))
    }

    /// Integer parse of the raw, unsanitized value
    pub fn optional_integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name)? {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(i),
                None => n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64),
            },
            Value::String(s) => parse_int(s),
            _ => None,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a scalar. Arrays and objects have no useful form and render empty.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        },
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Longest leading decimal literal, e.g. `"12.5abc"` -> 12.5
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Leading base-10 integer, e.g. `" 42px"` -> 42
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}
