use chrono::Utc;
use leptos::prelude::*;
use obra_types::decode_claims;

#[cfg(feature = "hydrate")]
mod storage {
    const TOKEN_KEY: &str = "token";

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    pub fn get_token() -> Option<String> {
        local_storage().and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
    }

    pub fn set_token(token: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    pub fn clear_token() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }

    /// Hard navigation so every signal and in-flight fetch is dropped
    /// with the session. Skipped when already on the login page.
    pub fn redirect_to_login() {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if location.pathname().ok().as_deref() != Some("/login") {
                let _ = location.set_href("/login");
            }
        }
    }
}

#[cfg(not(feature = "hydrate"))]
mod storage {
    pub fn get_token() -> Option<String> {
        None
    }

    pub fn set_token(_token: &str) {}

    pub fn clear_token() {}

    pub fn redirect_to_login() {}
}

/// Client-side view of the signed-in user, fed by the JWT the login
/// endpoint hands back. The token is kept in localStorage so a page
/// reload picks the session back up, and a timer signs the user out
/// the moment the token expires.
#[derive(Clone, Copy)]
pub struct SessionContext {
    token: ReadSignal<Option<String>>,
    set_token: WriteSignal<Option<String>>,
    role: ReadSignal<String>,
    set_role: WriteSignal<String>,
    ready: ReadSignal<bool>,
    set_ready: WriteSignal<bool>,
}

impl SessionContext {
    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    pub fn role(&self) -> String {
        self.role.get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.get().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.get() == "admin"
    }

    /// True once the stored token has been checked on the client.
    /// Guards wait for this so they do not bounce a user who is still
    /// being restored.
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Accepts a freshly issued token. A token that does not decode is
    /// ignored, one that is already past its expiry signs the user out.
    pub fn login(&self, token: &str) -> bool {
        match decode_claims(token) {
            Ok(claims) => {
                let remaining = claims.remaining_ms(Utc::now().timestamp_millis());
                if remaining <= 0 {
                    self.logout();
                    return false;
                }
                storage::set_token(token);
                self.set_token.set(Some(token.to_string()));
                self.set_role.set(claims.role);
                self.arm_expiry(token.to_string(), remaining as u64);
                true
            }
            Err(e) => {
                leptos::logging::warn!("ignoring malformed session token: {e}");
                false
            }
        }
    }

    pub fn logout(&self) {
        storage::clear_token();
        self.set_token.set(None);
        self.set_role.set(String::new());
        storage::redirect_to_login();
    }

    /// Re-reads localStorage after hydration. Anything expired or
    /// unreadable is discarded so the app starts signed out.
    fn restore(&self) {
        if let Some(stored) = storage::get_token() {
            match decode_claims(&stored) {
                Ok(claims) if claims.remaining_ms(Utc::now().timestamp_millis()) > 0 => {
                    let remaining = claims.remaining_ms(Utc::now().timestamp_millis());
                    self.set_token.set(Some(stored.clone()));
                    self.set_role.set(claims.role);
                    self.arm_expiry(stored, remaining as u64);
                }
                _ => storage::clear_token(),
            }
        }
        self.set_ready.set(true);
    }

    fn arm_expiry(&self, token: String, delay_ms: u64) {
        let session = *self;
        set_timeout(
            move || {
                // A newer login has its own timer; only kill the session
                // this timer was armed for.
                if session.token.get_untracked().as_deref() == Some(token.as_str()) {
                    session.logout();
                }
            },
            std::time::Duration::from_millis(delay_ms),
        );
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let (token, setToken) = signal(Option::<String>::None);
    let (role, setRole) = signal(String::new());
    let (ready, setReady) = signal(false);

    let ctx = SessionContext {
        token,
        set_token: setToken,
        role,
        set_role: setRole,
        ready,
        set_ready: setReady,
    };

    provide_context(ctx);

    // Effects never run during server rendering, so the restore only
    // happens in the browser where localStorage exists.
    Effect::new(move |_| {
        ctx.restore();
    });

    children()
}
