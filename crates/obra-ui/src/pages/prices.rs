use leptos::prelude::*;

use obra_types::Price;

use crate::components::dialogs::PriceDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Price>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer),
        FieldDef::new("version_id", "Version", FieldKind::Integer),
        FieldDef::new("code", "Code", FieldKind::Text).filterable("code"),
        FieldDef::new("description", "Description", FieldKind::Text).filterable("description"),
        FieldDef::new("base_price", "Base price", FieldKind::Number).with_view(Callback::new(
            |price: Price| view! { <span>{format!("{:.2}", price.base_price)}</span> }.into_any(),
        )),
        FieldDef::new("unit_id", "Unit", FieldKind::Integer),
        FieldDef::new("price_type", "Type", FieldKind::Text),
    ]
}

#[component]
pub fn PricesPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Prices"</h1>
            <p class="subtitle">"Price bank entries by version"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=PriceDialogs
        />
    }
}
