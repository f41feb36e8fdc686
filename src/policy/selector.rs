//! Identifier resolution.
//!
//! Each (resource, operation) pair carries a [`SelectorRule`]. Resolution is
//! a pure decision over already-sanitized values: conflicts are checked in
//! order, then the empty case, then the first present field in priority
//! order wins.

use std::collections::HashMap;

/// Two selector fields that may not be supplied together
#[derive(Debug, Clone, Copy)]
pub struct Conflict {
    pub field: &'static str,
    pub excludes: &'static [&'static str],
    pub message: &'static str,
}

/// What happens when no selector field is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenNone {
    /// Unfiltered read
    AllRows,
    /// Filter by the first field with an empty value (matches nothing in practice)
    MatchEmpty,
    /// Client error with this message
    Reject(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct SelectorRule {
    /// Selector fields in priority order
    pub fields: &'static [&'static str],
    pub conflicts: &'static [Conflict],
    pub when_none: WhenNone,
}

/// Target row set for a single statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Column { column: &'static str, value: String },
}

/// Resolution failure, echoed verbatim to the caller with a 400
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected(pub &'static str);

impl SelectorRule {
    /// Single mandatory identifier, e.g. `branch_id` on update
    pub const fn required(field: &'static [&'static str], message: &'static str) -> Self {
        Self {
            fields: field,
            conflicts: &[],
            when_none: WhenNone::Reject(message),
        }
    }

    /// Optional identifiers in priority order, unfiltered when none is given
    pub const fn optional(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            conflicts: &[],
            when_none: WhenNone::AllRows,
        }
    }

    /// Resolve against sanitized candidate values. Empty strings count as absent.
    pub fn resolve(&self, candidates: &HashMap<&'static str, String>) -> Result<Selection, Rejected> {
        let present = |field: &str| candidates.get(field).map(|v| !v.is_empty()).unwrap_or(false);

        for conflict in self.conflicts {
            if present(conflict.field) && conflict.excludes.iter().any(|other| present(*other)) {
                return Err(Rejected(conflict.message));
            }
        }

        match self.fields.iter().find(|field| present(**field)) {
            Some(&field) => Ok(Selection::Column {
                column: field,
                value: candidates.get(field).cloned().unwrap_or_default(),
            }),
            None => match self.when_none {
                WhenNone::AllRows => Ok(Selection::All),
                WhenNone::Reject(message) => Err(Rejected(message)),
                WhenNone::MatchEmpty => match self.fields.first() {
                    Some(&field) => Ok(Selection::Column {
                        column: field,
                        value: String::new(),
                    }),
                    None => Ok(Selection::All),
                },
            },
        }
    }
}
