use dioxus::prelude::*;
use ui::{ActivityLogPanel, ActivityLogToggle, Navbar};

use crate::Route;

/// Top navigation, routed content and the activity log overlay.
#[component]
pub fn AppShell() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Home {}, "Vaccinations" }
            Link { to: Route::Users {}, "Users" }
        }
        Outlet::<Route> {}
        ActivityLogPanel {}
        ActivityLogToggle {}
    }
}
