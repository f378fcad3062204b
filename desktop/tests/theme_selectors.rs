#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that critical CSS selectors required by the desktop UI (especially the
  studio form, preview panels and trend visualizations) remain present in the
  unified shared theme: ui/assets/theme/main.css
- Fail fast if a refactor accidentally drops or renames core classes, preventing a
  silent styling regression in packaged (embedded) desktop builds.

How it works:
- We compile‑time embed the unified theme using `include_str!` pointing to the shared
  `ui/` location (mirrors the constant in `desktop/src/main.rs`).
- We assert presence of a curated set of selectors / tokens.
- If you intentionally rename or remove a selector:
    1. Update the Dioxus component markup.
    2. Adjust this test's REQUIRED_SELECTORS accordingly.

Why not parse CSS properly?
- A lightweight substring presence check is sufficient as an early warning.
- Keeping zero extra dependencies avoids increasing compile times.

Extending:
- Add new selectors to REQUIRED_SELECTORS when introducing structural CSS relied
  upon by Rust components (charts, dials, palette editor, etc).
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    // Buttons & shared UI
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Studio form & cards
    ".studio {",
    ".studio-card",
    ".studio__controls",
    ".studio__output",
    ".studio__check",
    ".studio__hide",
    ".studio__hint",
    ".studio__status",
    ".studio__status--ok",
    ".studio__status--error",
    // Export & import surfaces
    ".studio__url",
    ".studio__copy-actions",
    ".studio__import",
    ".studio__embed",
    ".studio__document",
    // Palette editor
    ".studio__palette-actions",
    ".studio__palette-grid",
    ".studio__palette-entry",
    // Trend chart
    ".trend-chart",
    ".trend-chart--empty",
    ".trend-chart__grid",
    ".trend-chart__area",
    ".trend-chart__line",
    ".trend-chart__marker",
    ".trend-chart__x-label",
    // Score dial
    ".score-dial",
    ".score-dial__track",
    ".score-dial__fill",
    ".score-dial__value",
    ".score-dial--pass",
    ".score-dial--warn",
    ".score-dial--fail",
    // Trends page
    ".trends__form",
    ".trends__summary",
    ".trends__error",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn score_dial_grades_are_paired_with_fills() {
    // Every grade modifier must style the fill stroke, or the dial renders grey.
    for grade in ["pass", "warn", "fail"] {
        let selector = format!(".score-dial--{grade} .score-dial__fill");
        assert!(
            THEME_CSS.contains(&selector),
            "Missing dial fill styling for grade `{grade}`"
        );
    }
}
