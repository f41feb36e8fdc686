use crate::policy::SelectorRule;

use super::{CreateField, CreateRule, FieldKind, OnEmpty, PatchField, Resource, Supplied};

/// Branch ids are chosen by the caller on create.
pub static BRANCHES: Resource = Resource {
    name: "branch",
    collection: "branches",
    table: "branch",
    primary_key: "branch_id",
    role: None,
    on_empty: OnEmpty::NotFound,
    list: SelectorRule::optional(&["branch_id"]),
    update: SelectorRule::required(&["branch_id"], "branch_id is required."),
    delete: SelectorRule::required(&["branch_id"], "Provide branch_id."),
    create: CreateRule {
        fields: &[
            CreateField::text("branch_id"),
            CreateField::text("branch_name"),
            CreateField::text("address"),
            CreateField::text("city"),
            CreateField::text("manager_id"),
        ],
        message: "All fields are required.",
    },
    // city and manager_id are only written when non-empty
    patch: &[
        PatchField::defined("branch_name"),
        PatchField::defined("address"),
        PatchField::new("city", FieldKind::Text, Supplied::NonEmpty),
        PatchField::new("manager_id", FieldKind::Text, Supplied::NonEmpty),
    ],
    hidden: &[],
};
