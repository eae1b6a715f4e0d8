use leptos::prelude::*;

use obra_types::{CalculationMode, Decomposition, Price};

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
pub fn DecompositionDialog(request: DialogRequest<Decomposition>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Decomposition::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (parentPriceId, setParentPriceId) = signal(base.parent_price_id);
    let (componentPriceId, setComponentPriceId) = signal(base.component_price_id);
    let (calcMode, setCalcMode) = signal(base.calculation_mode.as_str().to_string());
    let (fixedQuantity, setFixedQuantity) = signal(
        base.fixed_quantity
            .map(|q| q.to_string())
            .unwrap_or_default(),
    );

    let (priceOptions, setPriceOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Price>(setPriceOptions, |p| {
        format!("{} - {}", p.code, p.description)
    });

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);
    let fixedSelected = move || calcMode.get() == CalculationMode::Fixed.as_str();

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.parent_price_id = parentPriceId.get_untracked();
        record.component_price_id = componentPriceId.get_untracked();
        record.calculation_mode =
            CalculationMode::parse(&calcMode.get_untracked()).unwrap_or(record.calculation_mode);
        let rawQuantity = fixedQuantity.get_untracked().trim().to_string();

        if mode != DialogMode::Delete {
            let mut problems: Vec<String> = [
                validate::selected(record.parent_price_id, "parent price"),
                validate::selected(record.component_price_id, "component price"),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect();
            match record.calculation_mode {
                CalculationMode::Fixed => {
                    if let Err(problem) = validate::numeric(&rawQuantity, "Fixed quantity") {
                        problems.push(problem);
                    } else {
                        record.fixed_quantity = rawQuantity.parse().ok();
                    }
                }
                // Formula components take their quantity from params_json.
                CalculationMode::Formula => record.fixed_quantity = None,
            }
            if !problems.is_empty() {
                setErrors.set(problems);
                return;
            }
        }
        setErrors.set(Vec::new());
        save_record(mode, record, "Decomposition", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Decomposition")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <SelectField
                label="Parent price"
                value=parentPriceId
                set_value=setParentPriceId
                options=priceOptions
                disabled=readOnly
                placeholder="Select a price"
            />
            <SelectField
                label="Component price"
                value=componentPriceId
                set_value=setComponentPriceId
                options=priceOptions
                disabled=readOnly
                placeholder="Select a price"
            />
            <ChoiceField
                label="Calculation mode"
                value=calcMode
                set_value=setCalcMode
                choices=CalculationMode::ALL.iter().map(|m| m.as_str()).collect()
                disabled=readOnly
            />
            {move || {
                if fixedSelected() {
                    view! {
                        <TextField
                            label="Fixed quantity"
                            value=fixedQuantity
                            set_value=setFixedQuantity
                            disabled=readOnly
                            kind="number"
                        />
                    }
                        .into_any()
                } else {
                    view! { <div></div> }.into_any()
                }
            }}
        </Modal>
    }
}
