use api::Severity;
use dioxus::prelude::*;

use crate::activity_log::use_activity_log;

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "activity-log-entry error",
        Severity::Warning => "activity-log-entry warning",
        Severity::Success => "activity-log-entry success",
        Severity::Info => "activity-log-entry info",
    }
}

/// Load progress, created entities and failures, newest first.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let snapshot = log();
    let entries: Vec<_> = snapshot.shown().cloned().collect();
    let errors_only = snapshot.errors_only;
    let error_count = snapshot.error_count();

    rsx! {
        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Activity ({error_count} errors)" }
                div {
                    label {
                        input {
                            r#type: "checkbox",
                            checked: errors_only,
                            onchange: move |evt: FormEvent| log.write().errors_only = evt.checked(),
                        }
                        "Errors only"
                    }
                    button {
                        onclick: move |_| log.write().clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            div {
                if entries.is_empty() {
                    div { class: "activity-log-entry", "Nothing logged yet." }
                }
                for entry in entries.iter() {
                    div {
                        class: severity_class(entry.notice.severity),
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { "{entry.notice.message}" }
                    }
                }
            }
        }
    }
}

/// Toggle button showing the entry count; highlighted once anything failed.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let count = log().len();
    let has_errors = log().error_count() > 0;

    rsx! {
        button {
            class: if has_errors { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: "Activity log",
            if count > 0 {
                "{count}"
            } else {
                "Log"
            }
        }
    }
}
