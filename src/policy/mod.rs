pub mod selector;
pub mod update;

pub use selector::{Conflict, Rejected, Selection, SelectorRule, WhenNone};
pub use update::{EmptyPatch, UpdateClause};
