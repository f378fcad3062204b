use dioxus::prelude::*;

use crate::studio::CardStudio;

#[component]
pub fn Studio() -> Element {
    // Subscribe to global language code (if provided) so this view re-renders
    // immediately when the locale changes elsewhere.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page page-studio",
            h1 { "Card studio" }
            p {
                "Point it at a repository, shape the card, and copy the request URL or Markdown embed."
            }
            CardStudio {}
        }
    }
}
