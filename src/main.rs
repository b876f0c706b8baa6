use dioxus::prelude::*;

mod api;
mod components;
mod db;
mod utils;

use components::AppShell;

const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");
const APP_CSS: Asset = asset!("/assets/app.css");

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    init_tracing();

    dioxus::launch(App);
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lectern=info")),
        )
        .init();
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#18181b" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Lectern" }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
