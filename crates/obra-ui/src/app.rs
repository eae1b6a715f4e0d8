use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::use_navigate,
    StaticSegment,
};

use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::budgets::BudgetsPage;
use crate::pages::decompositions::DecompositionsPage;
use crate::pages::elements::ElementsPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::measurements::MeasurementsPage;
use crate::pages::prices::PricesPage;
use crate::pages::projects::ProjectsPage;
use crate::pages::register::RegisterPage;
use crate::pages::roles::RolesPage;
use crate::pages::units::UnitsPage;
use crate::pages::users::UsersPage;
use crate::pages::versions::VersionsPage;
use crate::session::{use_session, SessionProvider};
use crate::theme::ThemeProvider;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/obra-console.css" />
        <Title text="Obra Console" />
        <SessionProvider>
            <ThemeProvider>
                <ToastProvider>
                    <Router>
                        <Routes fallback=|| view! { <p>"Page not found."</p> }.into_any()>
                            <Route path=StaticSegment("") view=LandingPage />
                            <Route path=StaticSegment("login") view=LoginPage />
                            <Route path=StaticSegment("register") view=RegisterPage />
                            <Route path=StaticSegment("admin") view=HomeView />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("projects"))
                                view=ProjectsView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("budgets"))
                                view=BudgetsView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("users"))
                                view=UsersView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("roles"))
                                view=RolesView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("units"))
                                view=UnitsView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("versions"))
                                view=VersionsView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("prices"))
                                view=PricesView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("elements"))
                                view=ElementsView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("measurements"))
                                view=MeasurementsView
                            />
                            <Route
                                path=(StaticSegment("admin"), StaticSegment("decompositions"))
                                view=DecompositionsView
                            />
                        </Routes>
                    </Router>
                </ToastProvider>
            </ThemeProvider>
        </SessionProvider>
    }
}

#[component]
fn LandingPage() -> impl IntoView {
    let session = use_session();

    let handleSignOut = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            spawn_local(async {
                crate::services::auth::logout().await;
            });
        }
        session.logout();
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"O"</div>
                    <h1>"Obra Console"</h1>
                    <p>"Project budgeting and cost control"</p>
                </div>
                {move || {
                    if session.is_ready() && session.is_logged_in() {
                        view! {
                            <div class="landing-session">
                                <p>"Signed in with the " {session.role()} " role."</p>
                                <button class="btn btn-ghost" on:click=handleSignOut>
                                    "Sign out"
                                </button>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <a class="btn btn-primary" href="/login">
                                "Sign In"
                            </a>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}

/// Gate around every admin view. Until the stored session has been
/// checked it shows a placeholder, so server and first client render
/// agree; once known, non-admins bounce to the login page.
#[component]
fn AdminShell(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if session.is_ready() && !(session.is_logged_in() && session.is_admin()) {
            navigate("/login", Default::default());
        }
    });

    view! {
        {move || {
            if session.is_ready() && session.is_logged_in() && session.is_admin() {
                view! {
                    <div class="app-layout">
                        <Nav />
                        <main class="main-content">{children()}</main>
                    </div>
                }
                    .into_any()
            } else {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Checking session..."
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn HomeView() -> impl IntoView {
    view! {
        <AdminShell>
            <HomePage />
        </AdminShell>
    }
}

#[component]
fn ProjectsView() -> impl IntoView {
    view! {
        <AdminShell>
            <ProjectsPage />
        </AdminShell>
    }
}

#[component]
fn BudgetsView() -> impl IntoView {
    view! {
        <AdminShell>
            <BudgetsPage />
        </AdminShell>
    }
}

#[component]
fn UsersView() -> impl IntoView {
    view! {
        <AdminShell>
            <UsersPage />
        </AdminShell>
    }
}

#[component]
fn RolesView() -> impl IntoView {
    view! {
        <AdminShell>
            <RolesPage />
        </AdminShell>
    }
}

#[component]
fn UnitsView() -> impl IntoView {
    view! {
        <AdminShell>
            <UnitsPage />
        </AdminShell>
    }
}

#[component]
fn VersionsView() -> impl IntoView {
    view! {
        <AdminShell>
            <VersionsPage />
        </AdminShell>
    }
}

#[component]
fn PricesView() -> impl IntoView {
    view! {
        <AdminShell>
            <PricesPage />
        </AdminShell>
    }
}

#[component]
fn ElementsView() -> impl IntoView {
    view! {
        <AdminShell>
            <ElementsPage />
        </AdminShell>
    }
}

#[component]
fn MeasurementsView() -> impl IntoView {
    view! {
        <AdminShell>
            <MeasurementsPage />
        </AdminShell>
    }
}

#[component]
fn DecompositionsView() -> impl IntoView {
    view! {
        <AdminShell>
            <DecompositionsPage />
        </AdminShell>
    }
}
