use leptos::prelude::*;

use obra_types::Version;

use crate::components::dialogs::VersionDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Version>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("name", "Name", FieldKind::Text).filterable("name"),
        FieldDef::new("created_at", "Created", FieldKind::Time),
    ]
}

#[component]
pub fn VersionsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Versions"</h1>
            <p class="subtitle">"Price bank editions"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=VersionDialogs
        />
    }
}
