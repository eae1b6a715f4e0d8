use leptos::prelude::*;

use obra_types::{Budget, Element, ElementType, Version};

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
pub fn ElementDialog(request: DialogRequest<Element>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Element::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (budgetId, setBudgetId) = signal(base.budget_id);
    // 0 stands for "no parent", i.e. a root chapter.
    let (parentId, setParentId) = signal(base.parent_id.unwrap_or(0));
    let (versionId, setVersionId) = signal(base.version_id);
    let (elementType, setElementType) = signal(base.element_type.as_str().to_string());
    let (code, setCode) = signal(base.code.clone());
    let (budgetCode, setBudgetCode) = signal(base.budget_code.clone());
    let (description, setDescription) = signal(base.description.clone().unwrap_or_default());

    let (budgetOptions, setBudgetOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Budget>(setBudgetOptions, |b| format!("{} - {}", b.code, b.name));
    let (parentOptions, setParentOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Element>(setParentOptions, |e| e.code.clone());
    let (versionOptions, setVersionOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Version>(setVersionOptions, |v| v.name.clone());

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.budget_id = budgetId.get_untracked();
        let parent = parentId.get_untracked();
        record.parent_id = if parent > 0 { Some(parent) } else { None };
        record.version_id = versionId.get_untracked();
        record.element_type =
            ElementType::parse(&elementType.get_untracked()).unwrap_or(record.element_type);
        record.code = code.get_untracked().trim().to_string();
        record.budget_code = budgetCode.get_untracked().trim().to_string();
        let description = description.get_untracked().trim().to_string();
        record.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };

        if mode != DialogMode::Delete {
            let problems: Vec<String> = [
                validate::selected(record.budget_id, "budget"),
                validate::selected(record.version_id, "version"),
                validate::required(&record.code, "Code"),
                validate::required(&record.budget_code, "Budget code"),
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
        save_record(mode, record, "Element", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Element")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <SelectField
                label="Budget"
                value=budgetId
                set_value=setBudgetId
                options=budgetOptions
                disabled=readOnly
                placeholder="Select a budget"
            />
            <SelectField
                label="Parent element"
                value=parentId
                set_value=setParentId
                options=parentOptions
                disabled=readOnly
                placeholder="None (root chapter)"
            />
            <SelectField
                label="Version"
                value=versionId
                set_value=setVersionId
                options=versionOptions
                disabled=readOnly
                placeholder="Select a version"
            />
            <ChoiceField
                label="Type"
                value=elementType
                set_value=setElementType
                choices=ElementType::ALL.iter().map(|t| t.as_str()).collect()
                disabled=readOnly
            />
            <TextField label="Code" value=code set_value=setCode disabled=readOnly />
            <TextField
                label="Budget code"
                value=budgetCode
                set_value=setBudgetCode
                disabled=readOnly
            />
            <TextField
                label="Description"
                value=description
                set_value=setDescription
                disabled=readOnly
                multiline=true
            />
        </Modal>
    }
}
