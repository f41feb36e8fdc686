use crate::policy::{Conflict, SelectorRule, WhenNone};

use super::{CreateField, CreateRule, FieldKind, OnEmpty, PatchField, Required, Resource, Supplied};

const ONE_KEY: &str = "Provide either loan_id OR customer_id, not both or neither.";

const BY_LOAN_OR_CUSTOMER: SelectorRule = SelectorRule {
    fields: &["loan_id", "customer_id"],
    conflicts: &[Conflict {
        field: "loan_id",
        excludes: &["customer_id"],
        message: ONE_KEY,
    }],
    when_none: WhenNone::Reject(ONE_KEY),
};

pub static LOANS: Resource = Resource {
    name: "loan",
    collection: "loans",
    table: "loan",
    primary_key: "loan_id",
    role: None,
    on_empty: OnEmpty::NotFound,
    list: SelectorRule {
        fields: &["loan_id", "customer_id"],
        conflicts: &[Conflict {
            field: "customer_id",
            excludes: &["loan_id"],
            message: "Provide either customer_id OR loan_id, not both.",
        }],
        when_none: WhenNone::AllRows,
    },
    update: BY_LOAN_OR_CUSTOMER,
    delete: BY_LOAN_OR_CUSTOMER,
    // amounts and rates must be non-zero
    create: CreateRule {
        fields: &[
            CreateField::text("customer_id"),
            CreateField::text("employee_id"),
            CreateField::new("amount", FieldKind::Number, Required::Truthy),
            CreateField::new("interest_rate", FieldKind::Number, Required::Truthy),
            CreateField::text("start_date"),
            CreateField::text("end_date"),
        ],
        message: "All fields are required.",
    },
    patch: &[
        PatchField::new("employee_id", FieldKind::Text, Supplied::Truthy),
        PatchField::new("amount", FieldKind::Number, Supplied::Defined),
        PatchField::new("interest_rate", FieldKind::Number, Supplied::Defined),
        PatchField::new("start_date", FieldKind::Text, Supplied::Truthy),
        PatchField::new("end_date", FieldKind::Text, Supplied::Truthy),
    ],
    hidden: &[],
};
