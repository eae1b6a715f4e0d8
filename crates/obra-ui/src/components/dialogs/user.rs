use leptos::prelude::*;

use obra_types::{Role, User};

use crate::components::modal::Modal;
use crate::components::record_table::DialogRequest;
use crate::components::toast::use_toasts;
use crate::table::DialogMode;
use crate::validate;

use super::{
    load_options, mode_ok_label, mode_title, save_record, FlagField, FormErrors, SelectField,
    TextField,
};

/// Passwords are not edited here; accounts come in through the register
/// flow and keep their stored hash across updates.
#[component]
pub fn UserDialog(request: DialogRequest<User>) -> impl IntoView {
    let DialogRequest {
        mode,
        selected,
        on_close,
    } = request;
    let base = match mode {
        DialogMode::Create => User::default(),
        _ => selected.unwrap_or_default(),
    };

    let toasts = use_toasts();
    let (errors, setErrors) = signal(Vec::<String>::new());
    let (saving, setSaving) = signal(false);

    let (username, setUsername) = signal(base.username.clone());
    let (email, setEmail) = signal(base.email.clone());
    let (roleId, setRoleId) = signal(base.role_id);
    let (isActive, setIsActive) = signal(base.is_active);

    let (roleOptions, setRoleOptions) = signal(Vec::<(i64, String)>::new());
    load_options::<Role>(setRoleOptions, |role| role.name.clone());

    let readOnly = matches!(mode, DialogMode::Read | DialogMode::Delete);

    let handleOk = move || {
        if mode == DialogMode::Read {
            on_close.run(None);
            return;
        }

        let mut record = base.clone();
        record.username = username.get_untracked().trim().to_string();
        record.email = email.get_untracked().trim().to_string();
        record.role_id = roleId.get_untracked();
        record.is_active = isActive.get_untracked();

        if mode != DialogMode::Delete {
            let problems: Vec<String> = [
                validate::required(&record.username, "Username"),
                validate::email(&record.email),
                validate::selected(record.role_id, "role"),
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
        save_record(mode, record, "User", setSaving, toasts, on_close);
    };

    view! {
        <Modal
            title=mode_title(mode, "User")
            saving=saving
            danger=mode == DialogMode::Delete
            hide_ok=mode == DialogMode::Read
            ok_text=mode_ok_label(mode)
            on_ok=handleOk
            on_cancel=move || on_close.run(None)
        >
            <FormErrors errors=errors />
            <TextField label="Username" value=username set_value=setUsername disabled=readOnly />
            <TextField label="Email" value=email set_value=setEmail disabled=readOnly kind="email" />
            <SelectField
                label="Role"
                value=roleId
                set_value=setRoleId
                options=roleOptions
                disabled=readOnly
                placeholder="Select a role"
            />
            <FlagField label="Active" value=isActive set_value=setIsActive disabled=readOnly />
        </Modal>
    }
}
