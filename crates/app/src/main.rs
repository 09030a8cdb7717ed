use client::api::HttpBackend;
use dioxus::prelude::*;

mod routes;
use routes::Route;

const THEME_BASE: Asset = asset!("/assets/theme-base.css");

fn main() {
    client::config::load_config();
    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

#[component]
fn App() -> Element {
    // One HTTP client for every page, tagged with the platform header
    use_context_provider(|| {
        let config = client::config::client_config();
        tracing::info!(
            base_url = %config.api.base_url,
            platform = client_platform(),
            "Reset client started"
        );
        HttpBackend::new(config.api.clone()).with_platform(client_platform())
    });

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_BASE }
        Router::<Route> {}
    }
}
