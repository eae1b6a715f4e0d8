use leptos::prelude::*;

use obra_types::Decomposition;

use crate::components::dialogs::DecompositionDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Decomposition>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("parent_price_id", "Parent price", FieldKind::Integer),
        FieldDef::new("component_price_id", "Component price", FieldKind::Integer),
        FieldDef::new("calculation_mode", "Mode", FieldKind::Text),
        FieldDef::new("fixed_quantity", "Fixed quantity", FieldKind::Number),
        FieldDef::new("created_at", "Created", FieldKind::Time),
    ]
}

#[component]
pub fn DecompositionsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Decompositions"</h1>
            <p class="subtitle">"Component breakdown of decomposed prices"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=DecompositionDialogs
        />
    }
}
