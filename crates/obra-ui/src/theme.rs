use leptos::prelude::*;

#[cfg(feature = "hydrate")]
mod storage {
    const MODE_KEY: &str = "mode";

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    pub fn get_mode() -> Option<String> {
        local_storage().and_then(|s| s.get_item(MODE_KEY).ok().flatten())
    }

    pub fn set_mode(mode: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(MODE_KEY, mode);
        }
    }
}

#[cfg(not(feature = "hydrate"))]
mod storage {
    pub fn get_mode() -> Option<String> {
        None
    }

    pub fn set_mode(_mode: &str) {}
}

/// Dark or light chrome, persisted per browser. Dark is the default.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    dark: ReadSignal<bool>,
    set_dark: WriteSignal<bool>,
}

impl ThemeContext {
    pub fn is_dark(&self) -> bool {
        self.dark.get()
    }

    pub fn toggle(&self) {
        let next = !self.dark.get_untracked();
        storage::set_mode(if next { "dark" } else { "light" });
        self.set_dark.set(next);
    }
}

pub fn use_theme() -> ThemeContext {
    expect_context::<ThemeContext>()
}

#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let (dark, setDark) = signal(true);

    let ctx = ThemeContext {
        dark,
        set_dark: setDark,
    };

    provide_context(ctx);

    Effect::new(move |_| {
        if let Some(saved) = storage::get_mode() {
            setDark.set(saved == "dark");
        }
    });

    view! {
        <div class=move || {
            if dark.get() { "app-root theme-dark" } else { "app-root theme-light" }
        }>{children()}</div>
    }
}
