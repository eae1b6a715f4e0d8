use leptos::prelude::*;

use obra_types::Element;

use crate::components::dialogs::ElementDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Element>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("budget_id", "Budget", FieldKind::Integer),
        FieldDef::new("parent_id", "Parent", FieldKind::Integer),
        FieldDef::new("version_id", "Version", FieldKind::Integer),
        FieldDef::new("element_type", "Type", FieldKind::Text),
        FieldDef::new("code", "Code", FieldKind::Text).filterable("code"),
        FieldDef::new("budget_code", "Budget code", FieldKind::Text).filterable("budget_code"),
        FieldDef::new("description", "Description", FieldKind::Text).filterable("description"),
    ]
}

#[component]
pub fn ElementsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Elements"</h1>
            <p class="subtitle">"Budget tree chapters and lines"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=ElementDialogs
        />
    }
}
