//! Resource descriptors.
//!
//! Every entity is one static [`Resource`]: its table, selector rules per
//! operation, the fields a create requires and the fields a patch may
//! carry. The generic handler in `handlers::protected::resource` reads
//! nothing else, so each (resource, operation) cell of the policy lives in
//! exactly one place.

pub mod accounts;
pub mod branches;
pub mod customers;
pub mod employees;
pub mod loans;
pub mod transactions;

use crate::auth::Role;
use crate::policy::SelectorRule;
use crate::sanitize::Fields;
use crate::types::{Operation, SqlValue};

pub use accounts::ACCOUNTS;
pub use branches::BRANCHES;
pub use customers::CUSTOMERS;
pub use employees::EMPLOYEES;
pub use loans::LOANS;
pub use transactions::TRANSACTIONS;

/// Every resource mounted under `/api/secure`
pub static ALL: [&Resource; 6] = [
    &ACCOUNTS,
    &BRANCHES,
    &CUSTOMERS,
    &EMPLOYEES,
    &LOANS,
    &TRANSACTIONS,
];

#[derive(Debug)]
pub struct Resource {
    /// Singular name used in log lines
    pub name: &'static str,
    /// Path segment and JSON list key
    pub collection: &'static str,
    pub table: &'static str,
    pub primary_key: &'static str,
    /// Role a caller must hold; `None` admits any authenticated caller
    pub role: Option<Role>,
    pub on_empty: OnEmpty,
    pub list: SelectorRule,
    pub update: SelectorRule,
    pub delete: SelectorRule,
    pub create: CreateRule,
    /// Updatable fields in SET order
    pub patch: &'static [PatchField],
    /// Columns never returned to clients
    pub hidden: &'static [&'static str],
}

impl Resource {
    /// Label used in storage error logs, e.g. `account(s)`
    pub fn log_label(&self, operation: Operation) -> String {
        match operation {
            Operation::Create => self.name.to_string(),
            Operation::List => self.collection.to_string(),
            Operation::Update | Operation::Delete => format!("{}(s)", self.name),
        }
    }
}

/// Read result when no row matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnEmpty {
    /// `200 { <collection>: [] }`
    EmptyList,
    /// `404 { error: "No records found." }`
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Float, e.g. `balance`
    Number,
    /// Integer parsed from the raw value, e.g. `completed`
    Integer,
    /// Text stored as a bcrypt hash
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required {
    /// Non-empty text, or non-zero number
    Truthy,
    /// Any number that parses, including zero
    Parsed,
    /// Non-empty text containing `@`
    Email,
    /// Stored as NULL when missing
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct CreateField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: Required,
}

impl CreateField {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text, required: Required::Truthy }
    }

    pub const fn new(name: &'static str, kind: FieldKind, required: Required) -> Self {
        Self { name, kind, required }
    }

    /// Read and check this field. `None` means the required check failed.
    pub fn read(&self, fields: &Fields) -> Option<SqlValue> {
        let value = match self.kind {
            FieldKind::Text | FieldKind::Password => {
                let text = fields.text(self.name);
                if text.is_empty() { SqlValue::Null } else { SqlValue::Text(text) }
            }
            FieldKind::Number => fields.number(self.name).map(SqlValue::Float).unwrap_or(SqlValue::Null),
            FieldKind::Integer => fields
                .optional_integer(self.name)
                .map(SqlValue::Int)
                .unwrap_or(SqlValue::Null),
        };

        let ok = match self.required {
            Required::Optional => true,
            Required::Parsed => value != SqlValue::Null,
            Required::Truthy => value.is_truthy(),
            Required::Email => matches!(&value, SqlValue::Text(s) if s.contains('@')),
        };
        ok.then_some(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CreateRule {
    pub fields: &'static [CreateField],
    /// 400 message when any required check fails
    pub message: &'static str,
}

/// When a patch field counts as supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Supplied {
    /// Key present; empty text and zero are written
    Defined,
    /// Key present and the cleaned text is non-empty
    NonEmpty,
    /// Raw value truthy and the cleaned text non-empty
    Truthy,
}

#[derive(Debug, Clone, Copy)]
pub struct PatchField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub supplied: Supplied,
}

impl PatchField {
    pub const fn defined(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text, supplied: Supplied::Defined }
    }

    pub const fn new(name: &'static str, kind: FieldKind, supplied: Supplied) -> Self {
        Self { name, kind, supplied }
    }

    /// The value to write, or `None` when the caller did not supply this field
    pub fn read(&self, fields: &Fields) -> Option<SqlValue> {
        let value = match (self.kind, self.supplied) {
            (FieldKind::Number, Supplied::Truthy) => SqlValue::Float(fields.number(self.name)?),
            (FieldKind::Number, _) => SqlValue::Float(fields.optional_number(self.name)?),
            (FieldKind::Integer, _) => SqlValue::Int(fields.optional_integer(self.name)?),
            (FieldKind::Text | FieldKind::Password, Supplied::Truthy) => {
                SqlValue::Text(fields.text(self.name))
            }
            (FieldKind::Text | FieldKind::Password, _) => {
                SqlValue::Text(fields.optional_text(self.name)?)
            }
        };

        match self.supplied {
            Supplied::Defined => Some(value),
            Supplied::NonEmpty | Supplied::Truthy => value.is_truthy().then_some(value),
        }
    }
}

/// Look up a resource by its path segment
pub fn find(collection: &str) -> Option<&'static Resource> {
    ALL.iter().copied().find(|r| r.collection == collection)
}
