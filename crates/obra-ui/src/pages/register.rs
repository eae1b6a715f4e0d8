use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::toast::use_toasts;
use crate::validate;

#[component]
pub fn RegisterPage() -> impl IntoView {
    #[allow(unused_variables)]
    let toasts = use_toasts();
    #[allow(unused_variables)]
    let navigate = use_navigate();

    let (username, setUsername) = signal(String::new());
    let (email, setEmail) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    let (confirmation, setConfirmation) = signal(String::new());
    let (error, setError) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (pending, setPending) = signal(false);

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let usernameValue = username.get_untracked().trim().to_string();
        let emailValue = email.get_untracked().trim().to_string();
        let passwordValue = password.get_untracked();
        let confirmValue = confirmation.get_untracked();

        if let Err(problem) = validate::required(&usernameValue, "Username")
            .and_then(|_| validate::email(&emailValue))
            .and_then(|_| validate::required(&passwordValue, "Password"))
            .and_then(|_| validate::confirm(&passwordValue, &confirmValue))
        {
            setError.set(Some(problem));
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            use crate::services::auth::{self, RegisterPayload};

            setPending.set(true);
            setError.set(None);
            let navigate = navigate.clone();
            spawn_local(async move {
                let payload = RegisterPayload {
                    username: usernameValue,
                    email: emailValue,
                    password: passwordValue,
                };
                match auth::register(&payload).await {
                    Ok(_) => {
                        toasts.success("Account created, sign in to continue");
                        navigate("/login", Default::default());
                    }
                    Err(e) => setError.set(Some(e.to_string())),
                }
                setPending.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (usernameValue, emailValue, passwordValue);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"O"</div>
                    <h1>"Create account"</h1>
                    <p>"New accounts start with the regular user role"</p>
                </div>

                {move || {
                    error.get().map(|message| view! { <div class="login-error">{message}</div> })
                }}

                <form on:submit=handleSubmit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            prop:value=move || username.get()
                            on:input=move |ev| setUsername.set(event_target_value(&ev))
                        />
                    </div>
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
                            prop:value=move || password.get()
                            on:input=move |ev| setPassword.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="confirmation">"Confirm password"</label>
                        <input
                            type="password"
                            id="confirmation"
                            prop:value=move || confirmation.get()
                            on:input=move |ev| setConfirmation.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Creating..." } else { "Create Account" }}
                    </button>
                </form>

                <p class="login-footer">
                    <a href="/login">"Already registered? Sign in"</a>
                </p>
            </div>
        </div>
    }
}
