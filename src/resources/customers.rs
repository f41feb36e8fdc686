use crate::policy::SelectorRule;

use super::{CreateField, CreateRule, OnEmpty, PatchField, Resource};

const BY_CUSTOMER: SelectorRule = SelectorRule::required(&["customer_id"], "customer_id is required.");

pub static CUSTOMERS: Resource = Resource {
    name: "customer",
    collection: "customers",
    table: "customer",
    primary_key: "customer_id",
    role: None,
    on_empty: OnEmpty::NotFound,
    list: SelectorRule::optional(&["customer_id"]),
    update: BY_CUSTOMER,
    delete: BY_CUSTOMER,
    create: CreateRule {
        fields: &[
            CreateField::text("first_name"),
            CreateField::text("last_name"),
            CreateField::text("email"),
            CreateField::text("phone_number"),
            CreateField::text("address"),
            CreateField::text("date_of_birth"),
            CreateField::text("branch_id"),
        ],
        message: "All fields are required.",
    },
    patch: &[
        PatchField::defined("first_name"),
        PatchField::defined("last_name"),
        PatchField::defined("email"),
        PatchField::defined("phone_number"),
        PatchField::defined("address"),
        PatchField::defined("date_of_birth"),
        PatchField::defined("branch_id"),
    ],
    hidden: &["password"],
};
