//! One dialog per record type, all following the same script: seed the
//! form from the selected record (or defaults for Create), validate on
//! confirm, call the matching service, then report the saved record
//! back to the table. Failures toast and leave the dialog open.

mod budget;
mod decomposition;
mod element;
mod measurement;
mod price;
mod project;
mod role;
mod unit;
mod user;
mod version;

pub use budget::BudgetDialog;
pub use decomposition::DecompositionDialog;
pub use element::ElementDialog;
pub use measurement::MeasurementDialog;
pub use price::PriceDialog;
pub use project::ProjectDialog;
pub use role::RoleDialog;
pub use unit::UnitDialog;
pub use user::UserDialog;
pub use version::VersionDialog;

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use obra_types::Record;

use crate::components::record_table::{DialogRequest, RecordDialogs};
use crate::components::toast::ToastContext;
use crate::table::DialogMode;

/// Emits the [`RecordDialogs`] capability for one record type, routing
/// each dialog mode to the matching component.
macro_rules! impl_record_dialogs {
    ($cap:ident, $record:ty, $dialog:ident) => {
        #[derive(Clone, Copy, Default)]
        pub struct $cap;

        impl RecordDialogs<$record> for $cap {
            fn create(&self, on_close: Callback<Option<$record>>) -> AnyView {
                let request = DialogRequest {
                    mode: DialogMode::Create,
                    selected: None,
                    on_close,
                };
                view! { <$dialog request=request /> }.into_any()
            }

            fn edit(&self, record: $record, on_close: Callback<Option<$record>>) -> AnyView {
                let request = DialogRequest {
                    mode: DialogMode::Update,
                    selected: Some(record),
                    on_close,
                };
                view! { <$dialog request=request /> }.into_any()
            }

            fn confirm_delete(
                &self,
                record: $record,
                on_close: Callback<Option<$record>>,
            ) -> AnyView {
                let request = DialogRequest {
                    mode: DialogMode::Delete,
                    selected: Some(record),
                    on_close,
                };
                view! { <$dialog request=request /> }.into_any()
            }

            fn view(&self, record: $record, on_close: Callback<Option<$record>>) -> AnyView {
                let request = DialogRequest {
                    mode: DialogMode::Read,
                    selected: Some(record),
                    on_close,
                };
                view! { <$dialog request=request /> }.into_any()
            }
        }
    };
}

impl_record_dialogs!(BudgetDialogs, obra_types::Budget, BudgetDialog);
impl_record_dialogs!(DecompositionDialogs, obra_types::Decomposition, DecompositionDialog);
impl_record_dialogs!(ElementDialogs, obra_types::Element, ElementDialog);
impl_record_dialogs!(MeasurementDialogs, obra_types::Measurement, MeasurementDialog);
impl_record_dialogs!(PriceDialogs, obra_types::Price, PriceDialog);
impl_record_dialogs!(ProjectDialogs, obra_types::Project, ProjectDialog);
impl_record_dialogs!(RoleDialogs, obra_types::Role, RoleDialog);
impl_record_dialogs!(UnitDialogs, obra_types::Unit, UnitDialog);
impl_record_dialogs!(UserDialogs, obra_types::User, UserDialog);
impl_record_dialogs!(VersionDialogs, obra_types::Version, VersionDialog);

pub(crate) fn mode_title(mode: DialogMode, noun: &str) -> String {
    match mode {
        DialogMode::Create => format!("New {noun}"),
        DialogMode::Update => format!("Edit {noun}"),
        DialogMode::Delete => format!("Delete {noun}"),
        DialogMode::Read => format!("{noun} details"),
        DialogMode::None => String::new(),
    }
}

pub(crate) fn mode_ok_label(mode: DialogMode) -> &'static str {
    match mode {
        DialogMode::Create => "Create",
        DialogMode::Delete => "Delete",
        _ => "Save",
    }
}

fn mode_verb(mode: DialogMode) -> &'static str {
    match mode {
        DialogMode::Create => "created",
        DialogMode::Update => "updated",
        DialogMode::Delete => "deleted",
        _ => "saved",
    }
}

/// Runs the service call for the dialog's mode. On success the record
/// the server returned goes back to the table through `on_close`; on
/// failure only a toast fires and the dialog stays put.
pub(crate) fn save_record<T>(
    mode: DialogMode,
    record: T,
    noun: &'static str,
    set_saving: WriteSignal<bool>,
    toasts: ToastContext,
    on_close: Callback<Option<T>>,
) where
    T: Record + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        use crate::services::records;

        set_saving.set(true);
        spawn_local(async move {
            let result = match mode {
                DialogMode::Create => records::create(&record).await,
                DialogMode::Update => records::update(&record).await,
                DialogMode::Delete => records::remove(&record).await,
                DialogMode::Read | DialogMode::None => {
                    set_saving.set(false);
                    on_close.run(None);
                    return;
                }
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    toasts.success(format!("{noun} {}", mode_verb(mode)));
                    on_close.run(Some(saved));
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (mode, record, noun, set_saving, toasts, on_close);
    }
}

/// Fills a foreign-key select with `(id, label)` pairs from the full
/// listing of the target resource.
pub(crate) fn load_options<T>(set: WriteSignal<Vec<(i64, String)>>, label: fn(&T) -> String)
where
    T: Record + DeserializeOwned + Send + Sync + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        use crate::services::records;

        spawn_local(async move {
            match records::read_all::<T>().await {
                Ok(list) => set.set(
                    list.iter()
                        .filter_map(|row| row.id().map(|id| (id, label(row))))
                        .collect(),
                ),
                Err(e) => {
                    leptos::logging::warn!("loading {} options failed: {e}", T::RESOURCE);
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (set, label);
    }
}

#[component]
pub(crate) fn FormErrors(errors: ReadSignal<Vec<String>>) -> impl IntoView {
    view! {
        {move || {
            let errors = errors.get();
            if errors.is_empty() {
                view! { <div></div> }.into_any()
            } else {
                view! {
                    <ul class="form-errors">
                        {errors.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                    </ul>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
pub(crate) fn TextField(
    #[prop(into)] label: String,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] multiline: bool,
    #[prop(into, default = String::from("text"))] kind: String,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            {if multiline {
                view! {
                    <textarea
                        prop:value=move || value.get()
                        disabled=disabled
                        on:input=move |ev| set_value.set(event_target_value(&ev))
                    ></textarea>
                }
                    .into_any()
            } else {
                view! {
                    <input
                        type=kind
                        prop:value=move || value.get()
                        disabled=disabled
                        on:input=move |ev| set_value.set(event_target_value(&ev))
                    />
                }
                    .into_any()
            }}
        </div>
    }
}

#[component]
pub(crate) fn FlagField(
    #[prop(into)] label: String,
    value: ReadSignal<bool>,
    set_value: WriteSignal<bool>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    view! {
        <div class="form-group form-group-flag">
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || value.get()
                    disabled=disabled
                    on:change=move |ev| set_value.set(event_target_checked(&ev))
                />
                {label}
            </label>
        </div>
    }
}

/// Foreign-key select; id 0 is the "nothing chosen" placeholder row.
#[component]
pub(crate) fn SelectField(
    #[prop(into)] label: String,
    value: ReadSignal<i64>,
    set_value: WriteSignal<i64>,
    options: ReadSignal<Vec<(i64, String)>>,
    #[prop(optional)] disabled: bool,
    #[prop(into, default = String::from("Select..."))] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select
                disabled=disabled
                on:change=move |ev| {
                    if let Ok(id) = event_target_value(&ev).parse::<i64>() {
                        set_value.set(id);
                    }
                }
            >
                <option value="0" selected=move || value.get() == 0>
                    {placeholder}
                </option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|(id, name)| {
                            view! {
                                <option
                                    value=id.to_string()
                                    selected=move || value.get() == id
                                >
                                    {name}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

/// Select over a closed set of wire values, e.g. a status enum.
#[component]
pub(crate) fn ChoiceField(
    #[prop(into)] label: String,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
    choices: Vec<&'static str>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select
                disabled=disabled
                on:change=move |ev| set_value.set(event_target_value(&ev))
            >
                {choices
                    .into_iter()
                    .map(|choice| {
                        view! {
                            <option
                                value=choice
                                selected=move || value.get() == choice
                            >
                                {choice}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
