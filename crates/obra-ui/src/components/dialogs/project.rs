use leptos::prelude::*;

use obra_types::Project;

use crate::components::modal::Modal;
use crate::components::record_table::DialogRequest;
use crate::components::toast::use_toasts;
use crate::table::DialogMode;
use crate::validate;

use super::{mode_ok_label, mode_title, save_record, FormErrors, TextField};

#[component]
pub fn ProjectDialog(request: DialogRequest<Project>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Project::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (code, setCode) = signal(base.code.clone());
    let (title, setTitle) = signal(base.title.clone());

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.code = code.get_untracked().trim().to_string();
        record.title = title.get_untracked().trim().to_string();

        if mode != DialogMode::Delete {
            let problems: Vec<String> = [
                validate::required(&record.code, "Code"),
                validate::required(&record.title, "Title"),
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
        save_record(mode, record, "Project", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Project")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <TextField label="Code" value=code set_value=setCode disabled=readOnly />
            <TextField label="Title" value=title set_value=setTitle disabled=readOnly />
        </Modal>
    }
}
