use leptos::prelude::*;

use obra_types::User;

use crate::components::dialogs::UserDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<User>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("username", "Username", FieldKind::Text).filterable("username"),
        FieldDef::new("email", "Email", FieldKind::Text).filterable("email"),
        FieldDef::new("role_id", "Role", FieldKind::Integer),
        FieldDef::new("is_active", "Active", FieldKind::Flag),
        FieldDef::new("created_at", "Created", FieldKind::Time),
    ]
}

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Users"</h1>
            <p class="subtitle">"Console accounts and their roles"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=UserDialogs
        />
    }
}
