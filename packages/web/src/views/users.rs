use dioxus::prelude::*;
use ui::views::UserListView;

#[component]
pub fn Users() -> Element {
    rsx! {
        UserListView {}
    }
}
