use leptos::prelude::*;

use obra_types::Unit;

use crate::components::modal::Modal;
use crate::components::record_table::DialogRequest;
use crate::components::toast::use_toasts;
use crate::table::DialogMode;
use crate::validate;

use super::{mode_ok_label, mode_title, save_record, FormErrors, TextField};

#[component]
pub fn UnitDialog(request: DialogRequest<Unit>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Unit::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (name, setName) = signal(base.name.clone());
    let (symbol, setSymbol) = signal(base.symbol.clone());
    let (description, setDescription) = signal(base.description.clone().unwrap_or_default());
    let (formula, setFormula) = signal(base.formula.clone());

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.name = name.get_untracked().trim().to_string();
        record.symbol = symbol.get_untracked().trim().to_string();
        let description = description.get_untracked().trim().to_string();
        record.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        record.formula = formula.get_untracked().trim().to_string();

        if mode != DialogMode::Delete {
            let problems: Vec<String> = [
                validate::required(&record.name, "Name"),
                validate::required(&record.symbol, "Symbol"),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect();
            if !problems.is_empty() {
                setErrors.set(problems);
                return;
            }
        }
        setErrors.set(Vec::new());
        save_record(mode, record, "Unit", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Unit")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <TextField label="Name" value=name set_value=setName disabled=readOnly />
            <TextField label="Symbol" value=symbol set_value=setSymbol disabled=readOnly />
            <TextField
                label="Description"
                value=description
                set_value=setDescription
                disabled=readOnly
                multiline=true
            />
            <TextField label="Formula" value=formula set_value=setFormula disabled=readOnly />
        </Modal>
    }
}
