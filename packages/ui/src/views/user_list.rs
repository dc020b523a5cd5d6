use api::dashboard::{FAILED_USERS, NO_USERS};
use api::Gateway;
use dioxus::prelude::*;

use crate::gateway::use_gateway;

/// Plain list of every user known to the backend.
#[component]
pub fn UserListView() -> Element {
    let gateway = use_gateway();

    let users = use_resource(move || {
        let gateway = gateway.clone();
        async move {
            let result = gateway.list_users().await;
            if let Err(e) = &result {
                tracing::error!("Error loading users: {e}");
            }
            result
        }
    });

    let body = match &*users.read_unchecked() {
        None => rsx! {
            p { class: "loading", "Loading users..." }
        },
        Some(Err(_)) => rsx! {
            div { class: "error-banner", "{FAILED_USERS}" }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { "{NO_USERS}" }
        },
        Some(Ok(list)) => rsx! {
            table {
                class: "dose-grid",
                thead {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Age" }
                        th { "Gender" }
                    }
                }
                tbody {
                    for user in list.iter() {
                        tr {
                            key: "{user.id}",
                            td { "{user.id}" }
                            td { "{user.display_name()}" }
                            td { {user.age.map(|a| a.to_string()).unwrap_or_default()} }
                            td { {user.gender.clone().unwrap_or_default()} }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Users" }
            {body}
        }
    }
}
