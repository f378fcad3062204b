//! UI chrome translations for Cardlab, built on the fluent stack:
//! `rust-embed` compiles the `.ftl` bundles into the binary, `i18n-embed`
//! picks a language, and `i18n-embed-fl` gives compile-checked lookups
//! through the [`t!`] macro.
//!
//! Bundles live under `ui/i18n/<locale>/cardlab-ui.ftl`, with `en-US` as
//! the fallback. Call [`init`] once at app start, then `t!("nav-home")`
//! anywhere in a component.
//!
//! This chooses the language of the app shell only. The `locale` field of
//! [`crate::core::config::CardConfig`] is a card parameter that travels to
//! the reporting service and is deliberately independent of it.
//!
//! Desktop asks the OS locale list via `DesktopLanguageRequester`; on wasm
//! `WebLanguageRequester` reads `navigator.languages` instead, and the
//! bundles are always embedded there (`debug-embed`).

use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-exported so the macro can reach it.

/// Shorthand over `fl!` that always goes through the shared [`LOADER`]:
///
/// ```ignore
/// t!("nav-home")
/// t!("hello-user", name = "Emma")
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain, doubling as the FTL filename in every locale folder.
const DOMAIN: &str = "cardlab-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Shared loader backing the [`t!`] macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Select languages from the platform's preference list. Safe to call more
/// than once; only the first call does anything.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            eprintln!("[i18n] Failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch the UI language at runtime, as the navbar picker does.
/// Unparseable tags are ignored rather than errored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Embedded locale tags, sorted, for populating the language picker.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn fallback_language_is_embedded() {
        assert!(available_languages().iter().any(|l| l == "en-US"));
    }

    #[test]
    fn nav_labels_resolve_from_the_fallback() {
        init();
        assert_eq!(fl!(&*LOADER, "nav-home"), "Home");
        assert_eq!(fl!(&*LOADER, "nav-studio"), "Card studio");
    }

    #[test]
    fn unknown_language_tag_keeps_the_current_bundle() {
        init();
        let before = fl!(&*LOADER, "nav-home");
        let _ = set_language("zz-ZZ");
        assert_eq!(fl!(&*LOADER, "nav-home"), before);
    }
}
