use leptos::prelude::*;

/// Dialog chrome shared by every record dialog: backdrop, title, the
/// caller's form as children, and the Cancel / confirm buttons. The
/// confirm button reflects `saving` and hides entirely in read mode.
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    #[prop(into)] saving: Signal<bool>,
    #[prop(optional)] danger: bool,
    #[prop(optional)] hide_ok: bool,
    #[prop(into, default = String::from("Save"))] ok_text: String,
    #[prop(into)] on_ok: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    children: Children,
) -> impl IntoView {
    let okLabel = ok_text;
    let okClass = if danger {
        "btn btn-danger"
    } else {
        "btn btn-primary"
    };
    let busyLabel = if danger { "Deleting..." } else { "Saving..." };

    view! {
        <div class="modal-backdrop">
            <div class="modal card">
                <h2 class="card-title">{title}</h2>
                <div class="modal-body">{children()}</div>
                <div class="modal-actions">
                    <button class="btn btn-ghost" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    {if hide_ok {
                        view! { <div></div> }.into_any()
                    } else {
                        view! {
                            <button
                                class=okClass
                                disabled=move || saving.get()
                                on:click=move |_| on_ok.run(())
                            >
                                {move || {
                                    if saving.get() {
                                        busyLabel.to_string()
                                    } else {
                                        okLabel.clone()
                                    }
                                }}
                            </button>
                        }
                            .into_any()
                    }}
                </div>
            </div>
        </div>
    }
}
