use leptos::prelude::*;

use obra_types::Project;

use crate::components::dialogs::ProjectDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Project>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer).width("70px"),
        FieldDef::new("code", "Code", FieldKind::Text)
            .filterable("code")
            .pinned(),
        FieldDef::new("title", "Title", FieldKind::Text).filterable("title"),
        FieldDef::new("created_at", "Created", FieldKind::Time),
    ]
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Projects"</h1>
            <p class="subtitle">"Construction projects under cost control"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=ProjectDialogs
        />
    }
}
