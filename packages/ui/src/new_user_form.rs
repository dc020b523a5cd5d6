use dioxus::prelude::*;
use records::NewUser;

/// Inline form for creating a user.
#[component]
pub fn NewUserForm(on_create: EventHandler<NewUser>, on_cancel: EventHandler<()>) -> Element {
    let mut name = use_signal(String::new);
    let mut age = use_signal(String::new);
    let mut gender = use_signal(String::new);
    let mut problem = use_signal(|| Option::<&'static str>::None);

    let handle_submit = move |_| match build_new_user(&name(), &age(), &gender()) {
        Ok(user) => {
            problem.set(None);
            on_create.call(user);
        }
        Err(msg) => problem.set(Some(msg)),
    };

    rsx! {
        div {
            class: "form-card",
            h2 { "New User" }

            {problem().map(|msg| rsx! {
                div { class: "error-banner", "{msg}" }
            })}

            div {
                class: "form-field",
                label { r#for: "new-user-name", "Name" }
                input {
                    id: "new-user-name",
                    r#type: "text",
                    value: name(),
                    oninput: move |evt| name.set(evt.value()),
                }
            }
            div {
                class: "form-field",
                label { r#for: "new-user-age", "Age" }
                input {
                    id: "new-user-age",
                    r#type: "number",
                    min: "0",
                    value: age(),
                    oninput: move |evt| age.set(evt.value()),
                }
            }
            div {
                class: "form-field",
                label { r#for: "new-user-gender", "Gender" }
                input {
                    id: "new-user-gender",
                    r#type: "text",
                    value: gender(),
                    oninput: move |evt| gender.set(evt.value()),
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

/// Validate raw form input. Age and gender are optional.
pub fn build_new_user(name: &str, age: &str, gender: &str) -> Result<NewUser, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required.");
    }
    let mut user = NewUser::new(name);
    let age = age.trim();
    if !age.is_empty() {
        user.age = Some(age.parse().map_err(|_| "Age must be a whole number.")?);
    }
    let gender = gender.trim();
    if !gender.is_empty() {
        user.gender = Some(gender.to_string());
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_new_user() {
        assert_eq!(build_new_user("  ", "", ""), Err("Name is required."));
        assert_eq!(
            build_new_user("Ana", "abc", ""),
            Err("Age must be a whole number.")
        );
        assert_eq!(build_new_user(" Ana ", "", " ").unwrap(), NewUser::new("Ana"));
        assert_eq!(
            build_new_user("Ana", "31", "F").unwrap(),
            NewUser::new("Ana").with_age(31).with_gender("F")
        );
    }
}
