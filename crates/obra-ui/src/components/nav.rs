use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::session::use_session;
use crate::theme::use_theme;

const LINKS: [(&str, &str, &str); 11] = [
    ("/admin", "\u{2302}", "Home"),
    ("/admin/projects", "\u{25A3}", "Projects"),
    ("/admin/budgets", "\u{2338}", "Budgets"),
    ("/admin/users", "\u{2689}", "Users"),
    ("/admin/roles", "\u{2699}", "Roles"),
    ("/admin/units", "\u{2300}", "Units"),
    ("/admin/versions", "\u{21BB}", "Versions"),
    ("/admin/prices", "\u{00A4}", "Prices"),
    ("/admin/elements", "\u{2B21}", "Elements"),
    ("/admin/measurements", "\u{232D}", "Measurements"),
    ("/admin/decompositions", "\u{26C1}", "Decompositions"),
];

#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let theme = use_theme();
    let location = use_location();
    let pathname = location.pathname;

    let handleSignOut = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            // The cookie-clearing request must finish before the logout
            // redirect tears the page down.
            spawn_local(async move {
                crate::services::auth::logout().await;
                session.logout();
            });
        }
        #[cfg(not(feature = "hydrate"))]
        session.logout();
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"O"</div>
                <span class="brand-text">"Obra Console"</span>
            </div>
            <ul class="nav-links">
                {LINKS
                    .into_iter()
                    .map(|(path, icon, label)| {
                        let liClass = move || {
                            let current = pathname.get();
                            let active = if path == "/admin" {
                                current == "/admin" || current == "/admin/"
                            } else {
                                current.starts_with(path)
                            };
                            if active { "nav-item active" } else { "nav-item" }
                        };
                        view! {
                            <li class=liClass>
                                <a href=path>
                                    <span class="nav-icon">{icon}</span>
                                    <span>{label}</span>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="nav-footer">
                <button class="btn btn-ghost btn-sm" on:click=move |_| theme.toggle()>
                    {move || if theme.is_dark() { "Light mode" } else { "Dark mode" }}
                </button>
                <button class="btn btn-ghost btn-sm" on:click=handleSignOut>
                    "Sign out"
                </button>
                <span class="nav-version">{concat!("v", env!("CARGO_PKG_VERSION"))}</span>
            </div>
        </nav>
    }
}
