use leptos::prelude::*;

use obra_types::{Element, Measurement, Price};

use crate::components::modal::Modal;
use crate::components::record_table::DialogRequest;
use crate::components::toast::use_toasts;
use crate::table::DialogMode;
use crate::validate;

use super::{
    load_options, mode_ok_label, mode_title, save_record, FormErrors, SelectField, TextField,
};

/// `params_json` is carried through untouched; formula parameters are
/// not edited from this form.
#[component]
pub fn MeasurementDialog(request: DialogRequest<Measurement>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Measurement::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (elementId, setElementId) = signal(base.element_id);
    let (priceId, setPriceId) = signal(base.price_id);
    let (text, setText) = signal(base.measurement_text.clone().unwrap_or_default());
    let (quantity, setQuantity) = signal(base.measured_quantity.to_string());

    let (elementOptions, setElementOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Element>(setElementOptions, |e| e.code.clone());
    let (priceOptions, setPriceOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Price>(setPriceOptions, |p| {
        format!("{} - {}", p.code, p.description)
    });

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.element_id = elementId.get_untracked();
        record.price_id = priceId.get_untracked();
        let text = text.get_untracked().trim().to_string();
        record.measurement_text = if text.is_empty() { None } else { Some(text) };
        let rawQuantity = quantity.get_untracked().trim().to_string();

        if mode != DialogMode::Delete {
            let problems: Vec<String> = [
                validate::selected(record.element_id, "element"),
                validate::selected(record.price_id, "price"),
                validate::numeric(&rawQuantity, "Quantity"),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect();
            if !problems.is_empty() {
                setErrors.set(problems);
                return;
            }
            record.measured_quantity = rawQuantity.parse().unwrap_or(0.0);
        }
        setErrors.set(Vec::new());
        save_record(mode, record, "Measurement", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Measurement")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <SelectField
                label="Element"
                value=elementId
                set_value=setElementId
                options=elementOptions
                disabled=readOnly
                placeholder="Select an element"
            />
            <SelectField
                label="Price"
                value=priceId
                set_value=setPriceId
                options=priceOptions
                disabled=readOnly
                placeholder="Select a price"
            />
            <TextField
                label="Measurement text"
                value=text
                set_value=setText
                disabled=readOnly
                multiline=true
            />
            <TextField
                label="Quantity"
                value=quantity
                set_value=setQuantity
                disabled=readOnly
                kind="number"
            />
        </Modal>
    }
}
