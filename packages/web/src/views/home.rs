use dioxus::prelude::*;
use ui::views::VaccinationView;

#[component]
pub fn Home() -> Element {
    rsx! {
        VaccinationView {}
    }
}
