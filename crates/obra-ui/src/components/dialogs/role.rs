use leptos::prelude::*;

use obra_types::Role;

use crate::components::modal::Modal;
use crate::components::record_table::DialogRequest;
use crate::components::toast::use_toasts;
use crate::table::DialogMode;
use crate::validate;

use super::{mode_ok_label, mode_title, save_record, FormErrors, TextField};

#[component]
pub fn RoleDialog(request: DialogRequest<Role>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => Role::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (name, setName) = signal(base.name.clone());

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.name = name.get_untracked().trim().to_string();

        if mode != DialogMode::Delete {
            if let Err(problem) = validate::role_name(&record.name) {
                setErrors.set(vec![problem]);
                return;
            }
        }
        setErrors.set(Vec::new());
        save_record(mode, record, "Role", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "Role")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <TextField label="Name" value=name set_value=setName disabled=readOnly />
            <p class="form-hint">"Role names use capital letters and underscores, e.g. SITE_MANAGER."</p>
        </Modal>
    }
}
