use crate::auth::Role;
use crate::policy::{Conflict, SelectorRule, WhenNone};

use super::{CreateField, CreateRule, FieldKind, OnEmpty, PatchField, Required, Resource, Supplied};

const ONE_KEY: &str = "Provide either account_id OR customer_id, not both or neither.";

const BY_ACCOUNT_OR_CUSTOMER: SelectorRule = SelectorRule {
    fields: &["account_id", "customer_id"],
    conflicts: &[Conflict {
        field: "account_id",
        excludes: &["customer_id"],
        message: ONE_KEY,
    }],
    when_none: WhenNone::Reject(ONE_KEY),
};

/// Accounts are always read per customer. An empty read is a 200 with `[]`.
pub static ACCOUNTS: Resource = Resource {
    name: "account",
    collection: "accounts",
    table: "account",
    primary_key: "account_id",
    role: Some(Role::Employee),
    on_empty: OnEmpty::EmptyList,
    list: SelectorRule {
        fields: &["customer_id"],
        conflicts: &[],
        when_none: WhenNone::MatchEmpty,
    },
    update: BY_ACCOUNT_OR_CUSTOMER,
    delete: BY_ACCOUNT_OR_CUSTOMER,
    create: CreateRule {
        fields: &[
            CreateField::text("customer_id"),
            CreateField::new("branch_id", FieldKind::Text, Required::Optional),
            CreateField::text("account_type"),
            CreateField::new("balance", FieldKind::Number, Required::Parsed),
            CreateField::text("date_opened"),
        ],
        message: "Required fields: customer_id, account_type, balance, date_opened.",
    },
    patch: &[
        PatchField::defined("branch_id"),
        PatchField::defined("account_type"),
        PatchField::new("balance", FieldKind::Number, Supplied::Defined),
        PatchField::defined("date_opened"),
    ],
    hidden: &[],
};
