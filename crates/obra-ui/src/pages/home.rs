use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    #[allow(unused_variables)]
    let (counts, setCounts) = signal(Option::<Result<(u64, u64), String>>::None);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        use crate::services::stats;

        spawn_local(async move {
            let result = async {
                let projects = stats::project_count().await.map_err(|e| e.to_string())?;
                let budgets = stats::budget_count().await.map_err(|e| e.to_string())?;
                Ok::<_, String>((projects, budgets))
            }
            .await;
            setCounts.set(Some(result));
        });
    }

    view! {
        <div class="dashboard-header">
            <h1>"Overview"</h1>
            <p class="subtitle">"Projects and budgets at a glance"</p>
        </div>
        {move || {
            match counts.get() {
                None => {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading overview..."
                        </div>
                    }
                        .into_any()
                }
                Some(Ok((projects, budgets))) => {
                    view! {
                        <div class="dashboard-grid">
                            <div class="card stat-card">
                                <div class="card-title">"Projects"</div>
                                <div class="stat-value">{projects.to_string()}</div>
                                <a class="btn btn-ghost btn-sm" href="/admin/projects">
                                    "Manage projects"
                                </a>
                            </div>
                            <div class="card stat-card">
                                <div class="card-title">"Budgets"</div>
                                <div class="stat-value">{budgets.to_string()}</div>
                                <a class="btn btn-ghost btn-sm" href="/admin/budgets">
                                    "Manage budgets"
                                </a>
                            </div>
                        </div>
                    }
                        .into_any()
                }
                Some(Err(e)) => {
                    view! {
                        <div class="card">
                            <p class="login-error">"Failed to load overview: " {e}</p>
                        </div>
                    }
                        .into_any()
                }
            }
        }}
    }
}
