use leptos::prelude::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
            ToastLevel::Warning => "toast toast-warning",
        }
    }

    /// Errors linger longer so a failed save is not missed while the
    /// user is still looking at the form.
    fn lifetime(self) -> Duration {
        match self {
            ToastLevel::Error => Duration::from_secs(8),
            _ => Duration::from_secs(4),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<Vec<Toast>>,
    serial: StoredValue<u64>,
}

impl ToastContext {
    pub fn push(&self, message: String, level: ToastLevel) {
        let id = self.serial.get_value();
        self.serial.set_value(id + 1);

        self.queue.update(|queue| {
            queue.push(Toast { id, message, level });
        });

        let queue = self.queue;
        set_timeout(
            move || queue.update(|q| q.retain(|t| t.id != id)),
            level.lifetime(),
        );
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.retain(|t| t.id != id));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Error);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Warning);
    }
}

pub fn use_toasts() -> ToastContext {
    expect_context::<ToastContext>()
}

/// Provides toast context and renders the toast stack. Place once near
/// the root; toasts dismiss on click or when their lifetime runs out.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext {
        queue: RwSignal::new(Vec::new()),
        serial: StoredValue::new(0),
    };

    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container">
            <For each=move || ctx.queue.get() key=|toast| toast.id let:toast>
                <div
                    class=toast.level.class()
                    on:click=move |_| ctx.dismiss(toast.id)
                >
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}
