use crate::auth::Role;
use crate::policy::{Conflict, SelectorRule, WhenNone};

use super::{CreateField, CreateRule, FieldKind, OnEmpty, PatchField, Required, Resource, Supplied};

const FIELDS: &[&str] = &["transaction_id", "account_id", "customer_id"];

const UPDATE_COMBINATION: &str =
    "Provide either transaction_id OR account_id OR customer_id, not combinations or none.";

const DELETE_EXACTLY_ONE: &str =
    "Provide exactly one of: transaction_id, account_id, or customer_id.";

/// Reads tolerate no selector; updates and deletes need exactly one.
pub static TRANSACTIONS: Resource = Resource {
    name: "transaction",
    collection: "transactions",
    table: "transaction",
    primary_key: "transaction_id",
    role: Some(Role::Employee),
    on_empty: OnEmpty::NotFound,
    list: SelectorRule {
        fields: FIELDS,
        conflicts: &[
            Conflict {
                field: "transaction_id",
                excludes: &["account_id", "customer_id"],
                message: "Provide only one of: transaction_id, account_id, or customer_id.",
            },
            Conflict {
                field: "account_id",
                excludes: &["customer_id"],
                message: "Provide either account_id OR customer_id, not both.",
            },
        ],
        when_none: WhenNone::AllRows,
    },
    update: SelectorRule {
        fields: FIELDS,
        conflicts: &[
            Conflict {
                field: "transaction_id",
                excludes: &["account_id", "customer_id"],
                message: "Provide only transaction_id for updates, not account_id or customer_id.",
            },
            Conflict {
                field: "account_id",
                excludes: &["customer_id"],
                message: UPDATE_COMBINATION,
            },
        ],
        when_none: WhenNone::Reject(UPDATE_COMBINATION),
    },
    delete: SelectorRule {
        fields: FIELDS,
        conflicts: &[
            Conflict {
                field: "transaction_id",
                excludes: &["account_id", "customer_id"],
                message: DELETE_EXACTLY_ONE,
            },
            Conflict {
                field: "account_id",
                excludes: &["customer_id"],
                message: DELETE_EXACTLY_ONE,
            },
        ],
        when_none: WhenNone::Reject(DELETE_EXACTLY_ONE),
    },
    create: CreateRule {
        fields: &[
            CreateField::text("account_id"),
            CreateField::text("customer_id"),
            CreateField::text("transaction_type"),
            CreateField::new("amount", FieldKind::Number, Required::Parsed),
            CreateField::text("timestamp"),
            CreateField::new("completed", FieldKind::Integer, Required::Optional),
        ],
        message: "Required fields: account_id, customer_id, transaction_type, amount, timestamp.",
    },
    patch: &[
        PatchField::defined("transaction_type"),
        PatchField::new("amount", FieldKind::Number, Supplied::Defined),
        PatchField::defined("timestamp"),
        PatchField::new("completed", FieldKind::Integer, Supplied::Defined),
    ],
    hidden: &[],
};
