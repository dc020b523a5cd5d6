use dioxus::prelude::*;
use records::NewVaccine;

/// Inline form for adding a vaccine to the catalog.
#[component]
pub fn NewVaccineForm(on_create: EventHandler<NewVaccine>, on_cancel: EventHandler<()>) -> Element {
    let mut name = use_signal(String::new);

    let handle_submit = move |_| {
        let n = name().trim().to_string();
        if n.is_empty() {
            return;
        }
        on_create.call(NewVaccine::new(n));
    };

    rsx! {
        div {
            class: "form-card",
            h2 { "New Vaccine" }
            div {
                class: "form-field",
                label { r#for: "new-vaccine-name", "Name" }
                input {
                    id: "new-vaccine-name",
                    r#type: "text",
                    placeholder: "e.g. BCG",
                    value: name(),
                    oninput: move |evt| name.set(evt.value()),
                }
            }
            div {
                class: "form-actions",
                button { class: "primary", onclick: handle_submit, "Create" }
                button { class: "secondary", onclick: move |_| on_cancel.call(()), "Cancel" }
            }
        }
    }
}
