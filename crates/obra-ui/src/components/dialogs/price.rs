use leptos::prelude::*;

use obra_types::{Price, PriceType, Unit, Version};

use crate::components::modal::Modal;
use crate::components::record_table::DialogRequest;
use crate::components::toast::use_toasts;
use crate::table::DialogMode;
use crate::validate;

use super::{
    load_options, mode_ok_label, mode_title, save_record, ChoiceField, FormErrors, SelectField,
    TextField,
};

#[component]
pub fn PriceDialog(request: DialogRequest<Price>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Price::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (versionId, setVersionId) = signal(base.version_id);
    let (code, setCode) = signal(base.code.clone());
    let (description, setDescription) = signal(base.description.clone());
    let (basePrice, setBasePrice) = signal(base.base_price.to_string());
    let (unitId, setUnitId) = signal(base.unit_id);
    let (priceType, setPriceType) = signal(base.price_type.as_str().to_string());

    let (versionOptions, setVersionOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Version>(setVersionOptions, |v| v.name.clone());
    let (unitOptions, setUnitOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Unit>(setUnitOptions, |u| format!("{} ({})", u.name, u.symbol));

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.version_id = versionId.get_untracked();
        record.code = code.get_untracked().trim().to_string();
        record.description = description.get_untracked().trim().to_string();
        record.unit_id = unitId.get_untracked();
        record.price_type =
            PriceType::parse(&priceType.get_untracked()).unwrap_or(record.price_type);
        let rawPrice = basePrice.get_untracked().trim().to_string();

        if mode != DialogMode::Delete {
            let problems: Vec<String> = [
                validate::selected(record.version_id, "version"),
                validate::required(&record.code, "Code"),
                validate::required(&record.description, "Description"),
                validate::numeric(&rawPrice, "Base price"),
                validate::selected(record.unit_id, "unit"),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect();
            if !problems.is_empty() {
                setErrors.set(problems);
                return;
            }
            record.base_price = rawPrice.parse().unwrap_or(0.0);
        }
        setErrors.set(Vec::new());
        save_record(mode, record, "Price", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Price")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <SelectField
                label="Version"
                value=versionId
                set_value=setVersionId
                options=versionOptions
                disabled=readOnly
                placeholder="Select a version"
            />
            <TextField label="Code" value=code set_value=setCode disabled=readOnly />
            <TextField
                label="Description"
                value=description
                set_value=setDescription
                disabled=readOnly
                multiline=true
            />
            <TextField
                label="Base price"
                value=basePrice
                set_value=setBasePrice
                disabled=readOnly
                kind="number"
            />
            <SelectField
                label="Unit"
                value=unitId
                set_value=setUnitId
                options=unitOptions
                disabled=readOnly
                placeholder="Select a unit"
            />
            <ChoiceField
                label="Price type"
                value=priceType
                set_value=setPriceType
                choices=PriceType::ALL.iter().map(|t| t.as_str()).collect()
                disabled=readOnly
            />
        </Modal>
    }
}
