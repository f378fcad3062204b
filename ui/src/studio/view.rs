//! The card studio: a form over [`CardConfig`], the availability-driven
//! control groups, the palette editor, import/export and the live preview.
//!
//! Every edit funnels through one commit path: apply the patch, normalize
//! against availability, then schedule a debounced preview refresh. Stale
//! JSON responses are discarded by token so a slow request can never
//! overwrite the preview for a newer edit.

use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::core::availability;
use crate::core::config::{
    clamp_cache_seconds, clamp_duration, clamp_langs_count, clamp_width, field_vocabulary,
    AnimationMode, CardConfig, CardFormat, CardKind, CardPatch, FieldSelection, HideFlag,
    THEME_NAMES,
};
use crate::core::export::export_url;
use crate::core::import::parse_import;
use crate::core::palette::{PaletteKey, PaletteState, PRESETS};
use crate::core::preview::{
    fetch_document, plan_preview, PreviewGate, PreviewPlan, PREVIEW_FAILURE_MESSAGE,
};
use crate::core::settings::Settings;
use crate::core::{platform, timing};

/// Trailing debounce applied to every edit before the preview refreshes.
const PREVIEW_DEBOUNCE_MS: u64 = 180;

#[derive(Clone, Debug, PartialEq)]
enum PreviewState {
    Loading,
    Image { url: String, markdown: String },
    Document(String),
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
enum StudioStatus {
    Idle,
    Notice(String),
    Error(String),
}

async fn refresh_preview(
    settings: Signal<Settings>,
    config: Signal<CardConfig>,
    mut preview: Signal<PreviewState>,
    mut gate: Signal<PreviewGate>,
) {
    let token = gate.with_mut(|gate| gate.issue());

    let url = export_url(&settings().base_url, &config());
    match plan_preview(&config(), &url) {
        PreviewPlan::Image { url, markdown } => {
            preview.set(PreviewState::Image { url, markdown });
        }
        PreviewPlan::Document { url } => {
            preview.set(PreviewState::Loading);
            let outcome = fetch_document(&url).await;
            if !gate().is_current(token) {
                // A newer edit superseded this request while it was in flight.
                return;
            }
            match outcome {
                Ok(document) => preview.set(PreviewState::Document(document)),
                Err(_) => preview.set(PreviewState::Failed),
            }
        }
    }
}

#[component]
pub fn CardStudio() -> Element {
    let settings = use_signal(Settings::load);
    let mut config = use_signal(|| {
        let mut config = CardConfig::default();
        if let Some(locale) = platform::page_locale() {
            config.locale = locale;
        }
        config
    });
    let mut palette_state = use_signal(PaletteState::default);
    let mut import_text = use_signal(String::new);
    let mut status = use_signal(|| StudioStatus::Idle);
    let preview = use_signal(|| PreviewState::Loading);
    let mut gate = use_signal(PreviewGate::default);

    // First paint gets a preview without waiting for an edit.
    use_future(move || async move {
        refresh_preview(settings, config, preview, gate).await;
    });

    let mut schedule = move || {
        let generation = gate.with_mut(|gate| gate.open_window());
        spawn(async move {
            timing::sleep_ms(PREVIEW_DEBOUNCE_MS).await;
            if !gate().window_is_current(generation) {
                // A later edit restarted the debounce window.
                return;
            }
            refresh_preview(settings, config, preview, gate).await;
        });
    };

    let mut commit = move |patch: CardPatch| {
        config.with_mut(|cfg| {
            cfg.apply(patch);
            availability::normalize(cfg);
        });
        schedule();
    };

    // Palette edits bypass the patch path: the editor owns the working
    // palette and mirrors it into the config wholesale.
    let mut sync_palette = move || {
        let current = palette_state().current.clone();
        config.with_mut(|cfg| cfg.palette = Some(current));
        schedule();
    };

    let on_theme = move |evt: FormEvent| {
        let theme = crate::core::config::normalize_theme(&evt.value());
        if theme == "custom" {
            palette_state.with_mut(|state| state.capture_default());
            let current = palette_state().current.clone();
            config.with_mut(|cfg| {
                cfg.theme = theme;
                cfg.palette = Some(current);
                availability::normalize(cfg);
            });
            schedule();
        } else {
            commit(CardPatch {
                theme: Some(theme),
                ..CardPatch::default()
            });
        }
    };

    let mut toggle_hide = move |flag: HideFlag| {
        config.with_mut(|cfg| {
            if !cfg.hide.remove(&flag) {
                cfg.hide.insert(flag);
            }
        });
        schedule();
    };

    let mut toggle_field = move |name: &'static str| {
        config.with_mut(|cfg| {
            let vocab = field_vocabulary(cfg.kind);
            let mut names: BTreeSet<String> = match &cfg.fields {
                FieldSelection::All => vocab.iter().map(|name| name.to_string()).collect(),
                FieldSelection::None => BTreeSet::new(),
                FieldSelection::Only(names) => names.clone(),
            };
            if !names.remove(name) {
                names.insert(name.to_string());
            }
            cfg.fields = if names.is_empty() {
                FieldSelection::None
            } else if vocab.iter().all(|name| names.contains(*name)) {
                FieldSelection::All
            } else {
                FieldSelection::Only(names)
            };
        });
        schedule();
    };

    let on_import = move |_| {
        match parse_import(import_text().as_str()) {
            Ok(patch) => {
                config.with_mut(|cfg| {
                    cfg.apply(patch);
                    availability::normalize(cfg);
                });
                // Keep the editor's working palette aligned with imported
                // overrides (normalize may also have cleared it).
                if let Some(palette) = config().palette.clone() {
                    palette_state.with_mut(|state| state.current = palette);
                }
                status.set(StudioStatus::Notice("Imported configuration.".to_string()));
                schedule();
            }
            Err(err) => status.set(StudioStatus::Error(err.to_string())),
        }
    };

    let current = config();
    let avail = availability::resolve(current.kind, current.format, current.theme);
    let url = export_url(&settings().base_url, &current);

    let on_langs = {
        let format = current.format;
        move |evt: FormEvent| {
            commit(CardPatch {
                langs_count: Some(clamp_langs_count(&evt.value(), format)),
                ..CardPatch::default()
            })
        }
    };

    let copy_url = {
        let url = url.clone();
        move |_| {
            // Clipboard failures are deliberately not surfaced.
            let _ = platform::copy_to_clipboard(&url);
            status.set(StudioStatus::Notice("Request URL copied.".to_string()));
        }
    };

    let feedback = match &status() {
        StudioStatus::Idle => None,
        StudioStatus::Notice(message) => {
            Some(("studio__status studio__status--ok".to_string(), message.clone()))
        }
        StudioStatus::Error(message) => Some((
            "studio__status studio__status--error".to_string(),
            message.clone(),
        )),
    };

    rsx! {
        div { class: "studio",
            div { class: "studio__controls",
                section { class: "studio-card",
                    h2 { "Repository" }
                    label { r#for: "studio-owner", "Owner" }
                    input {
                        id: "studio-owner",
                        r#type: "text",
                        value: "{current.owner}",
                        placeholder: "octocat",
                        oninput: move |evt: FormEvent| commit(CardPatch {
                            owner: Some(evt.value()),
                            ..CardPatch::default()
                        }),
                    }
                    label { r#for: "studio-repo", "Repository" }
                    input {
                        id: "studio-repo",
                        r#type: "text",
                        value: "{current.repo}",
                        placeholder: "hello-world",
                        oninput: move |evt: FormEvent| commit(CardPatch {
                            repo: Some(evt.value()),
                            ..CardPatch::default()
                        }),
                    }

                    label { r#for: "studio-kind", "Card" }
                    select {
                        id: "studio-kind",
                        value: "{current.kind.as_str()}",
                        onchange: move |evt: FormEvent| {
                            if let Some(kind) = CardKind::parse(&evt.value()) {
                                commit(CardPatch { kind: Some(kind), ..CardPatch::default() });
                            }
                        },
                        option { value: "repo", "Repository overview" }
                        option { value: "quality", "Quality scan" }
                    }

                    label { r#for: "studio-format", "Format" }
                    select {
                        id: "studio-format",
                        value: "{current.format.as_str()}",
                        onchange: move |evt: FormEvent| {
                            if let Some(format) = CardFormat::parse(&evt.value()) {
                                commit(CardPatch { format: Some(format), ..CardPatch::default() });
                            }
                        },
                        option { value: "svg", "SVG card" }
                        option { value: "json", "JSON document" }
                    }

                    label { r#for: "studio-locale", "Locale" }
                    input {
                        id: "studio-locale",
                        r#type: "text",
                        value: "{current.locale}",
                        onchange: move |evt: FormEvent| commit(CardPatch {
                            locale: Some(evt.value()),
                            ..CardPatch::default()
                        }),
                    }
                }

                section { class: "studio-card",
                    h2 { "Appearance" }
                    label { r#for: "studio-theme", "Theme" }
                    select {
                        id: "studio-theme",
                        value: "{current.theme}",
                        disabled: !avail.svg_controls,
                        onchange: on_theme,
                        for name in THEME_NAMES {
                            option { key: "{name}", value: "{name}", "{name}" }
                        }
                    }

                    label { r#for: "studio-width", "Card width" }
                    input {
                        id: "studio-width",
                        r#type: "number",
                        value: "{current.width}",
                        disabled: !avail.svg_controls,
                        onchange: move |evt: FormEvent| commit(CardPatch {
                            width: Some(clamp_width(&evt.value())),
                            ..CardPatch::default()
                        }),
                    }

                    label { r#for: "studio-title", "Custom title" }
                    input {
                        id: "studio-title",
                        r#type: "text",
                        value: current.title.clone().unwrap_or_default(),
                        disabled: !avail.svg_controls,
                        oninput: move |evt: FormEvent| commit(CardPatch {
                            title: Some(evt.value()),
                            ..CardPatch::default()
                        }),
                    }

                    if avail.languages_count {
                        label { r#for: "studio-langs", "Languages shown" }
                        input {
                            id: "studio-langs",
                            r#type: "number",
                            value: "{current.langs_count}",
                            onchange: on_langs,
                        }
                    }

                    if avail.svg_controls {
                        fieldset { class: "studio__hide",
                            legend { "Hide blocks" }
                            for flag in HideFlag::ALL.into_iter().filter(|flag| flag.applies_to(current.kind)) {
                                label { key: "{flag.as_str()}", class: "studio__check",
                                    input {
                                        r#type: "checkbox",
                                        checked: current.hide.contains(&flag),
                                        onchange: move |_| toggle_hide(flag),
                                    }
                                    "{flag.as_str()}"
                                }
                            }
                        }
                    }
                }

                if avail.svg_controls {
                    section { class: "studio-card",
                        h2 { "Animation" }
                        label { class: "studio__check",
                            input {
                                r#type: "checkbox",
                                checked: current.animate,
                                onchange: move |evt: FormEvent| commit(CardPatch {
                                    animate: Some(evt.checked()),
                                    ..CardPatch::default()
                                }),
                            }
                            "Animate the card"
                        }
                        label { r#for: "studio-animation", "Animated parts" }
                        select {
                            id: "studio-animation",
                            value: "{current.animation.as_str()}",
                            disabled: !current.animate,
                            onchange: move |evt: FormEvent| {
                                if let Some(animation) = AnimationMode::parse(&evt.value()) {
                                    commit(CardPatch { animation: Some(animation), ..CardPatch::default() });
                                }
                            },
                            for mode in AnimationMode::ALL {
                                option { key: "{mode.as_str()}", value: "{mode.as_str()}", "{mode.as_str()}" }
                            }
                        }
                        label { r#for: "studio-duration", "Duration (ms)" }
                        input {
                            id: "studio-duration",
                            r#type: "number",
                            value: "{current.duration_ms}",
                            disabled: !current.animate,
                            onchange: move |evt: FormEvent| commit(CardPatch {
                                duration_ms: Some(clamp_duration(&evt.value())),
                                ..CardPatch::default()
                            }),
                        }
                        label { r#for: "studio-cache", "Cache (seconds)" }
                        input {
                            id: "studio-cache",
                            r#type: "number",
                            value: "{current.cache_seconds}",
                            onchange: move |evt: FormEvent| commit(CardPatch {
                                cache_seconds: Some(clamp_cache_seconds(&evt.value())),
                                ..CardPatch::default()
                            }),
                        }
                    }
                }

                if avail.json_controls {
                    section { class: "studio-card",
                        h2 { "Document fields" }
                        p { class: "studio__hint",
                            "Unchecking everything requests an empty document, not the full one."
                        }
                        for name in field_vocabulary(current.kind).iter().copied() {
                            label { key: "{name}", class: "studio__check",
                                input {
                                    r#type: "checkbox",
                                    checked: field_checked(&current.fields, name),
                                    onchange: move |_| toggle_field(name),
                                }
                                "{name}"
                            }
                        }
                        if avail.include_report_enabled(current.kind) {
                            label { class: "studio__check",
                                input {
                                    r#type: "checkbox",
                                    checked: current.include_report,
                                    onchange: move |evt: FormEvent| commit(CardPatch {
                                        include_report: Some(evt.checked()),
                                        ..CardPatch::default()
                                    }),
                                }
                                "Include the full findings report"
                            }
                        }
                    }
                }

                if avail.palette_editor {
                    section { class: "studio-card",
                        h2 { "Palette" }
                        div { class: "studio__palette-actions",
                            select {
                                onchange: move |evt: FormEvent| {
                                    let applied = palette_state
                                        .with_mut(|state| state.apply_preset(&evt.value()));
                                    if applied {
                                        sync_palette();
                                    }
                                },
                                option { value: "", disabled: true, selected: true, "Start from a preset" }
                                for entry in PRESETS.iter() {
                                    option { key: "{entry.name}", value: "{entry.name}", "{entry.name}" }
                                }
                            }
                            button {
                                r#type: "button",
                                class: "button",
                                onclick: move |_| {
                                    palette_state.with_mut(|state| state.randomize());
                                    sync_palette();
                                },
                                "Randomize"
                            }
                            button {
                                r#type: "button",
                                class: "button button--ghost",
                                onclick: move |_| {
                                    palette_state.with_mut(|state| state.reset_to_default());
                                    sync_palette();
                                },
                                "Reset"
                            }
                        }
                        div { class: "studio__palette-grid",
                            for key in PaletteKey::ALL {
                                label { key: "{key.as_str()}", class: "studio__palette-entry",
                                    span { "{key.as_str()}" }
                                    input {
                                        r#type: "text",
                                        value: "{palette_state().current.get(key)}",
                                        onchange: move |evt: FormEvent| {
                                            palette_state
                                                .with_mut(|state| state.current.set(key, evt.value()));
                                            sync_palette();
                                        },
                                    }
                                }
                            }
                        }
                    }
                }

                section { class: "studio-card",
                    h2 { "Import" }
                    p { class: "studio__hint",
                        "Paste a card URL, a Markdown embed, or owner/repo shorthand."
                    }
                    textarea {
                        class: "studio__import",
                        rows: "3",
                        value: "{import_text()}",
                        oninput: move |evt: FormEvent| import_text.set(evt.value()),
                    }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: on_import,
                        "Import"
                    }
                }
            }

            div { class: "studio__output",
                section { class: "studio-card",
                    h2 { "Request URL" }
                    code { class: "studio__url", "{url}" }
                    div { class: "studio__copy-actions",
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: copy_url,
                            "Copy URL"
                        }
                        if let PreviewState::Image { markdown, .. } = preview() {
                            button {
                                r#type: "button",
                                class: "button",
                                onclick: move |_| {
                                    let _ = platform::copy_to_clipboard(&markdown);
                                    status.set(StudioStatus::Notice(
                                        "Markdown embed copied.".to_string(),
                                    ));
                                },
                                "Copy Markdown"
                            }
                        }
                    }
                    if let Some((class_name, message)) = feedback {
                        p { class: "{class_name}", "{message}" }
                    }
                }

                section { class: "studio-card studio__preview",
                    h2 { "Preview" }
                    match preview() {
                        PreviewState::Loading => rsx! {
                            p { class: "studio__hint", "Loading preview…" }
                        },
                        PreviewState::Image { url, markdown } => rsx! {
                            img { class: "studio__preview-image", src: "{url}", alt: "Card preview" }
                            code { class: "studio__embed", "{markdown}" }
                        },
                        PreviewState::Document(document) => rsx! {
                            pre { class: "studio__document", code { "{document}" } }
                        },
                        PreviewState::Failed => rsx! {
                            p { class: "studio__status studio__status--error",
                                "{PREVIEW_FAILURE_MESSAGE}"
                            }
                        },
                    }
                }
            }
        }
    }
}

/// Whether `name` reads as selected under the current field selection.
fn field_checked(selection: &FieldSelection, name: &str) -> bool {
    match selection {
        FieldSelection::All => true,
        FieldSelection::None => false,
        FieldSelection::Only(names) => names.contains(name),
    }
}
