use leptos::prelude::*;

use obra_types::Unit;

use crate::components::dialogs::UnitDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Unit>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("name", "Name", FieldKind::Text).filterable("name"),
        FieldDef::new("symbol", "Symbol", FieldKind::Text).filterable("symbol"),
        FieldDef::new("description", "Description", FieldKind::Text).filterable("description"),
        FieldDef::new("formula", "Formula", FieldKind::Text).filterable("formula"),
    ]
}

#[component]
pub fn UnitsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Units"</h1>
            <p class="subtitle">"Measurement units used by prices and quantities"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=UnitDialogs
        />
    }
}
