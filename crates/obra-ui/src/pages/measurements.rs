use leptos::prelude::*;

use obra_types::Measurement;

use crate::components::dialogs::MeasurementDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Measurement>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("element_id", "Element", FieldKind::Integer),
        FieldDef::new("price_id", "Price", FieldKind::Integer),
        FieldDef::new("measurement_text", "Text", FieldKind::Text).filterable("measurement_text"),
        FieldDef::new("measured_quantity", "Quantity", FieldKind::Number),
        FieldDef::new("created_at", "Created", FieldKind::Time),
    ]
}

#[component]
pub fn MeasurementsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Measurements"</h1>
            <p class="subtitle">"Quantities taken against budget elements"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=MeasurementDialogs
        />
    }
}
