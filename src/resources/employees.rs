use crate::auth::Role;
use crate::policy::SelectorRule;

use super::{CreateField, CreateRule, FieldKind, OnEmpty, PatchField, Required, Resource};

/// Employee reads prefer `employee_id` over `branch_id` without rejecting both.
pub static EMPLOYEES: Resource = Resource {
    name: "employee",
    collection: "employees",
    table: "employee",
    primary_key: "employee_id",
    role: Some(Role::Employee),
    on_empty: OnEmpty::NotFound,
    list: SelectorRule::optional(&["employee_id", "branch_id"]),
    update: SelectorRule::required(&["employee_id"], "employee_id is required."),
    delete: SelectorRule::required(&["employee_id"], "Provide employee_id."),
    create: CreateRule {
        fields: &[
            CreateField::text("first_name"),
            CreateField::text("last_name"),
            CreateField::new("email", FieldKind::Text, Required::Email),
            CreateField::text("phone_number"),
            CreateField::text("position"),
            CreateField::text("hire_date"),
            CreateField::text("branch_id"),
            CreateField::new("password", FieldKind::Password, Required::Truthy),
        ],
        message: "All fields must be correctly filled.",
    },
    // password changes are not accepted through a patch
    patch: &[
        PatchField::defined("first_name"),
        PatchField::defined("last_name"),
        PatchField::defined("email"),
        PatchField::defined("phone_number"),
        PatchField::defined("position"),
        PatchField::defined("hire_date"),
        PatchField::defined("branch_id"),
    ],
    hidden: &["password"],
};
