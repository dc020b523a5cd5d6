use dioxus::prelude::*;
use records::{dose_label, NewVaccinationRecord, Vaccine, VaccineId};

/// Inline form for recording a dose for the selected user.
#[component]
pub fn NewRecordForm(
    user_name: String,
    vaccines: Vec<Vaccine>,
    dose_levels: Vec<i32>,
    on_create: EventHandler<NewVaccinationRecord>,
    on_cancel: EventHandler<()>,
) -> Element {
    let first_vaccine = vaccines.first().map(|v| v.id.to_string()).unwrap_or_default();
    let first_dose = dose_levels.first().copied().unwrap_or(1).to_string();
    let mut vaccine = use_signal(move || first_vaccine);
    let mut dose = use_signal(move || first_dose);
    let mut date = use_signal(String::new);
    let mut note = use_signal(String::new);
    let mut problem = use_signal(|| Option::<&'static str>::None);
    let dose_options: Vec<(i32, String)> = dose_levels.iter().map(|&d| (d, dose_label(d))).collect();

    let handle_submit = move |_| match build_new_record(&vaccine(), &dose(), &date(), &note()) {
        Ok(record) => {
            problem.set(None);
            on_create.call(record);
        }
        Err(msg) => problem.set(Some(msg)),
    };

    rsx! {
        div {
            class: "form-card",
            h2 { "New Vaccination for {user_name}" }

            {problem().map(|msg| rsx! {
                div { class: "error-banner", "{msg}" }
            })}

            div {
                class: "form-field",
                label { r#for: "new-record-vaccine", "Vaccine" }
                select {
                    id: "new-record-vaccine",
                    value: vaccine(),
                    onchange: move |evt| vaccine.set(evt.value()),
                    for v in vaccines.iter() {
                        option { key: "{v.id}", value: "{v.id}", "{v.name}" }
                    }
                }
            }
            div {
                class: "form-field",
                label { r#for: "new-record-dose", "Dose" }
                select {
                    id: "new-record-dose",
                    value: dose(),
                    onchange: move |evt| dose.set(evt.value()),
                    for (level, label) in dose_options.iter() {
                        option { key: "{level}", value: "{level}", "{label}" }
                    }
                }
            }
            div {
                class: "form-field",
                label { r#for: "new-record-date", "Application date" }
                input {
                    id: "new-record-date",
                    r#type: "date",
                    value: date(),
                    oninput: move |evt| date.set(evt.value()),
                }
            }
            div {
                class: "form-field",
                label { r#for: "new-record-note", "Note" }
                input {
                    id: "new-record-note",
                    r#type: "text",
                    value: note(),
                    oninput: move |evt| note.set(evt.value()),
                }
            }

            div {
                class: "form-actions",
                button { class: "primary", onclick: handle_submit, "Save" }
                button { class: "secondary", onclick: move |_| on_cancel.call(()), "Cancel" }
            }
        }
    }
}

/// Validate raw form input. The dose is not range-checked.
pub fn build_new_record(
    vaccine: &str,
    dose: &str,
    date: &str,
    note: &str,
) -> Result<NewVaccinationRecord, &'static str> {
    let vaccine_id: VaccineId = vaccine.trim().parse().map_err(|_| "Choose a vaccine.")?;
    let dose_number: i32 = dose.trim().parse().map_err(|_| "Choose a dose.")?;
    let application_date = date.trim();
    if application_date.is_empty() {
        return Err("Application date is required.");
    }
    let note = note.trim();
    Ok(NewVaccinationRecord {
        vaccine_id,
        dose_number,
        application_date: application_date.to_string(),
        note: (!note.is_empty()).then(|| note.to_string()),
    })
}
