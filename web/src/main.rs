use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::{Home, Studio, Trends};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/studio")]
    Studio {},
    #[route("/trends")]
    Trends {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const THEME_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_studio(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Studio {},
        "{label}"
    })
}
fn nav_trends(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Trends {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        // Register localized navigation builder
        register_nav(NavBuilder {
            home: nav_home,
            studio: nav_studio,
            trends: nav_trends,
        });
    }

    rsx! {
        // Global app resources: the shared theme inlined, web tweaks as an asset
        document::Style { "{THEME_CSS_INLINE}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
