use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::session::use_session;
use crate::validate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (email, setEmail) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (pending, setPending) = signal(false);

    // Covers both a restored session and a fresh login: as soon as the
    // session reports signed in, leave this page.
    Effect::new(move |_| {
        if session.is_ready() && session.is_logged_in() {
            let target = if session.is_admin() { "/admin" } else { "/" };
            navigate(target, Default::default());
        }
    });

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let emailValue = email.get_untracked().trim().to_string();
        let passwordValue = password.get_untracked();
        if let Err(problem) = validate::email(&emailValue)
            .and_then(|_| validate::required(&passwordValue, "Password"))
        {
            setError.set(Some(problem));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            use crate::services::auth::{self, LoginPayload};

            setPending.set(true);
            setError.set(None);
            spawn_local(async move {
                let payload = LoginPayload {
                    email: emailValue,
                    password: passwordValue,
                };
                match auth::login(&payload).await {
                    Ok(token) => {
                        if !session.login(&token) {
                            setError.set(Some("Session token was not accepted".to_string()));
                        }
                    }
                    Err(e) => setError.set(Some(e.to_string())),
                }
                setPending.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (emailValue, passwordValue);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"O"</div>
                    <h1>"Obra Console"</h1>
                    <p>"Sign in to manage projects and budgets"</p>
                </div>

                {move || {
                    error.get().map(|message| view! { <div class="login-error">{message}</div> })
                }}

                <form on:submit=handleSubmit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| setEmail.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| setPassword.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <p class="login-footer">
                    <a href="/register">"Need an account? Register"</a>
                </p>
            </div>
        </div>
    }
}
