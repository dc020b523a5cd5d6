use dioxus::prelude::*;

use crate::Route;

/// Any unknown path goes back to `/`.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No route for /{}, redirecting", segments.join("/"));
    nav.replace(Route::Home {});
    rsx! {}
}
