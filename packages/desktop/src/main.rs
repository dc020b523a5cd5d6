use dioxus::prelude::*;

use views::{AppShell, Home, NotFound, Users};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Home {},
        #[route("/users")]
        Users {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

fn main() {
    // VAXBOOK_API_URL may come from a local .env
    dotenvy::dotenv().ok();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context_provider(ui::load_config);
    use_context_provider(|| ui::make_gateway(&config));
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::DashboardProvider {
            Router::<Route> {}
        }
    }
}
