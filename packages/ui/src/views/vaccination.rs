use api::dashboard::NO_USER_SELECTED;
use dioxus::prelude::*;
use futures::channel::oneshot;
use records::{NewUser, NewVaccinationRecord, NewVaccine, User, UserId};

use crate::dashboard::{use_dashboard, use_dashboard_commands, DashboardCommand};
use crate::{DoseGrid, NewRecordForm, NewUserForm, NewVaccineForm, UserPicker};

#[derive(Clone, Copy, Debug, PartialEq)]
enum OpenForm {
    User,
    Vaccine,
    Record,
}

/// User picker, profile summary and dose grid, plus the create forms.
///
/// Expects a `DashboardProvider` above it. Loader work runs in the provider,
/// so leaving this view does not interrupt it.
#[component]
pub fn VaccinationView() -> Element {
    let dashboard = use_dashboard();
    let commands = use_dashboard_commands();
    let mut open_form = use_signal(|| Option::<OpenForm>::None);

    let dash = dashboard();
    let can_add_record = dash.selected_user_id().is_some() && !dash.vaccines().is_empty();

    // Close the open form once the provider reports the entity as created
    let close_on_success = move |created: oneshot::Receiver<bool>| {
        spawn(async move {
            if matches!(created.await, Ok(true)) {
                open_form.set(None);
            }
        });
    };

    let on_select = {
        let commands = commands.clone();
        move |user_id: UserId| commands.send(DashboardCommand::Select(user_id))
    };

    let handle_refresh = {
        let commands = commands.clone();
        move |_| commands.send(DashboardCommand::Refresh)
    };

    let handle_create_user = {
        let commands = commands.clone();
        move |user: NewUser| {
            let (done, created) = oneshot::channel();
            commands.send(DashboardCommand::CreateUser(user, done));
            close_on_success(created);
        }
    };

    let handle_create_vaccine = {
        let commands = commands.clone();
        move |vaccine: NewVaccine| {
            let (done, created) = oneshot::channel();
            commands.send(DashboardCommand::CreateVaccine(vaccine, done));
            close_on_success(created);
        }
    };

    let handle_create_record = {
        let commands = commands.clone();
        move |record: NewVaccinationRecord| {
            let (done, created) = oneshot::channel();
            commands.send(DashboardCommand::CreateRecord(record, done));
            close_on_success(created);
        }
    };

    let form = match open_form() {
        Some(OpenForm::User) => rsx! {
            NewUserForm {
                on_create: handle_create_user,
                on_cancel: move |_| open_form.set(None),
            }
        },
        Some(OpenForm::Vaccine) => rsx! {
            NewVaccineForm {
                on_create: handle_create_vaccine,
                on_cancel: move |_| open_form.set(None),
            }
        },
        Some(OpenForm::Record) => match dash.selected_user_id() {
            Some(user_id) => rsx! {
                NewRecordForm {
                    user_name: dash.user().map(User::display_name).unwrap_or_else(|| format!("User #{user_id}")),
                    vaccines: dash.vaccines().to_vec(),
                    dose_levels: dash.dose_levels().to_vec(),
                    on_create: handle_create_record,
                    on_cancel: move |_| open_form.set(None),
                }
            },
            None => rsx! {
                div { class: "error-banner", "{NO_USER_SELECTED}" }
            },
        },
        None => rsx! {},
    };

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Vaccination History" }

            {dash.error_message().map(|msg| rsx! {
                div { class: "error-banner", "{msg}" }
            })}

            div {
                class: "toolbar",
                UserPicker {
                    users: dash.users().to_vec(),
                    selected: dash.selected_user_id(),
                    on_select: on_select,
                }
                button { class: "secondary", onclick: move |_| open_form.set(Some(OpenForm::User)), "New User" }
                button { class: "secondary", onclick: move |_| open_form.set(Some(OpenForm::Vaccine)), "New Vaccine" }
                button {
                    class: "secondary",
                    disabled: !can_add_record,
                    onclick: move |_| open_form.set(Some(OpenForm::Record)),
                    "Add Vaccination"
                }
                button { class: "secondary", onclick: handle_refresh, "Refresh" }
            }

            {form}

            if dash.loading() {
                p { class: "loading", "Loading..." }
            } else {
                {dash.user().map(|user| rsx! {
                    UserSummary { user: user.clone() }
                })}
                if dash.selected_user_id().is_some() {
                    DoseGrid {
                        columns: dash.vaccine_columns().to_vec(),
                        records: dash.records().to_vec(),
                        dose_levels: dash.dose_levels().to_vec(),
                    }
                }
            }
        }
    }
}

#[component]
fn UserSummary(user: User) -> Element {
    let age = user.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
    let gender = user.gender.clone().unwrap_or_else(|| "-".to_string());
    let name = user.display_name();

    rsx! {
        div {
            class: "form-card",
            h2 { "{name}" }
            p { "Age: {age} · Gender: {gender}" }
        }
    }
}
