use leptos::prelude::*;

use obra_types::Role;

use crate::components::dialogs::RoleDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Role>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("name", "Name", FieldKind::Text).filterable("name"),
        FieldDef::new("created_at", "Created", FieldKind::Time),
    ]
}

#[component]
pub fn RolesPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Roles"</h1>
            <p class="subtitle">"Access roles for console accounts"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=RoleDialogs
        />
    }
}
