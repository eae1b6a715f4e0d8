use leptos::prelude::*;

use obra_types::{Budget, BudgetStatus, Project};

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
pub fn BudgetDialog(request: DialogRequest<Budget>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Budget {
            version_number: 1,
            ..Budget::default()
        },
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (projectId, setProjectId) = signal(base.project_id);
    let (code, setCode) = signal(base.code.clone());
    let (versionNumber, setVersionNumber) = signal(base.version_number.to_string());
    let (name, setName) = signal(base.name.clone());
    let (status, setStatus) = signal(base.status.as_str().to_string());

    let (projectOptions, setProjectOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Project>(setProjectOptions, |p| format!("{} - {}", p.code, p.title));

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.project_id = projectId.get_untracked();
        record.code = code.get_untracked().trim().to_string();
        record.name = name.get_untracked().trim().to_string();
        record.status =
            BudgetStatus::parse(&status.get_untracked()).unwrap_or(record.status);
        let rawVersion = versionNumber.get_untracked().trim().to_string();

        if mode != DialogMode::Delete {
            let mut problems: Vec<String> = [
                validate::selected(record.project_id, "project"),
                validate::required(&record.code, "Code"),
                validate::required(&record.name, "Name"),
                validate::numeric(&rawVersion, "Version number"),
            ]
            .into_iter()
            .filter_map(Result::err)
            .collect();
            match rawVersion.parse::<i32>() {
                Ok(n) if n >= 1 => record.version_number = n,
                _ => {
                    if problems.is_empty() {
                        problems.push("Version number must be 1 or higher".to_string());
                    }
                }
            }
            if !problems.is_empty() {
                setErrors.set(problems);
                return;
            }
        }
        setErrors.set(Vec::new());
        save_record(mode, record, "Budget", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Budget")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <SelectField
                label="Project"
                value=projectId
                set_value=setProjectId
                options=projectOptions
                disabled=readOnly
                placeholder="Select a project"
            />
            <TextField label="Code" value=code set_value=setCode disabled=readOnly />
            <TextField label="Name" value=name set_value=setName disabled=readOnly />
            <TextField
                label="Version number"
                value=versionNumber
                set_value=setVersionNumber
                disabled=readOnly
                kind="number"
            />
            <ChoiceField
                label="Status"
                value=status
                set_value=setStatus
                choices=BudgetStatus::ALL.iter().map(|s| s.as_str()).collect()
                disabled=readOnly
            />
        </Modal>
    }
}
