use dioxus::prelude::*;
use records::{User, UserId};

use crate::activity_log::use_activity_log;

/// Dropdown of loaded users. Emits the chosen identifier.
#[component]
pub fn UserPicker(
    users: Vec<User>,
    selected: Option<UserId>,
    #[props(default)] disabled: bool,
    on_select: EventHandler<UserId>,
) -> Element {
    let mut log = use_activity_log();
    let value = selected.map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        div {
            class: "form-field",
            label { r#for: "user-picker", "User" }
            select {
                id: "user-picker",
                value: value,
                disabled: disabled || users.is_empty(),
                onchange: move |evt: FormEvent| {
                    match evt.value().parse::<UserId>() {
                        Ok(id) => on_select.call(id),
                        Err(e) => {
                            tracing::warn!("Ignoring user selection {:?}: {e}", evt.value());
                            log.write().warn(format!("Ignored user selection {:?}", evt.value()));
                        }
                    }
                },
                if selected.is_none() {
                    option { value: "", disabled: true, "Select a user" }
                }
                for user in users.iter() {
                    option {
                        key: "{user.id}",
                        value: "{user.id}",
                        selected: Some(user.id) == selected,
                        "{user.display_name()}"
                    }
                }
            }
        }
    }
}
