//! UPDATE clause construction.
//!
//! A pure function from the resource's fixed field order plus the supplied
//! patch to an ordered list of assignments and their bound values. The
//! selector value is appended after every patch value so the parameter
//! order always matches `SET ... WHERE <selector> = ?`.

use crate::types::SqlValue;

/// The patch contained no supplied field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPatch;

impl EmptyPatch {
    pub const MESSAGE: &'static str = "No update fields provided.";
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateClause {
    columns: Vec<&'static str>,
    values: Vec<SqlValue>,
    selector: Option<&'static str>,
}

impl UpdateClause {
    /// Fields arrive in the resource's order; `None` means not supplied.
    pub fn build<I>(patch: I) -> Result<Self, EmptyPatch>
    where
        I: IntoIterator<Item = (&'static str, Option<SqlValue>)>,
    {
        let mut columns = Vec::new();
        let mut values = Vec::new();

        for (column, value) in patch {
            if let Some(value) = value {
                columns.push(column);
                values.push(value);
            }
        }

        if columns.is_empty() {
            return Err(EmptyPatch);
        }

        Ok(Self { columns, values, selector: None })
    }

    /// Restrict the update to one selector column; its value is bound last.
    pub fn restrict_to(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.selector = Some(column);
        self.values.push(value.into());
        self
    }

    /// `` `col` = ? `` assignments in field order
    pub fn assignments(&self) -> Vec<String> {
        self.columns.iter().map(|c| format!("`{}` = ?", c)).collect()
    }

    pub fn selector(&self) -> Option<&'static str> {
        self.selector
    }

    /// Patch values followed by the selector value
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Column/value pairs of the patch alone
    pub fn patch(&self) -> impl Iterator<Item = (&'static str, &SqlValue)> {
        self.columns.iter().copied().zip(self.values.iter())
    }

    /// Bound selector value, present once restricted
    pub fn selector_value(&self) -> Option<&SqlValue> {
        self.selector.and_then(|_| self.values.last())
    }
}
