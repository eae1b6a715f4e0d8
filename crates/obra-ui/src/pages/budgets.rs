use leptos::prelude::*;

use obra_types::Budget;

use crate::components::dialogs::BudgetDialogs;
use crate::components::record_table::RecordTable;
use crate::table::{FieldDef, FieldKind};

fn fields() -> Vec<FieldDef<Budget>> {
    vec![
        FieldDef::new("id", "ID", FieldKind::Integer).width("70px"),
        FieldDef::new("project_id", "Project", FieldKind::Integer),
        FieldDef::new("code", "Code", FieldKind::Text)
            .filterable("code")
            .pinned(),
        FieldDef::new("name", "Name", FieldKind::Text).filterable("name"),
        FieldDef::new("version_number", "Version", FieldKind::Integer),
        FieldDef::new("status", "Status", FieldKind::Text)
            .filterable("status")
            .with_view(Callback::new(|budget: Budget| {
                let status = budget.status.as_str();
                view! {
                    <span class=format!("status-badge status-{status}")>{status}</span>
                }
                    .into_any()
            })),
        FieldDef::new("created_at", "Created", FieldKind::Time),
    ]
}

#[component]
pub fn BudgetsPage() -> impl IntoView {
    view! {
        <div class="dashboard-header">
            <h1>"Budgets"</h1>
            <p class="subtitle">"Costed versions of each project"</p>
        </div>
        <RecordTable
            fields=fields()
            has_actions=true
            dialogs=BudgetDialogs
        />
    }
}
