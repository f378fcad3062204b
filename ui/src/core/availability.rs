//! Pure lookup from (kind, format, theme) to the set of configuration groups
//! that are currently meaningful, plus the normalize step that clears fields
//! the moment they stop being available.

use super::config::{CardConfig, CardFormat, CardKind, FieldSelection, HideFlag};

/// Enabled/disabled state of every configuration group for one
/// (kind, format, theme) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    /// Theme, title, hide flags, width, animation and cache controls.
    pub svg_controls: bool,
    /// Language-list length (repo cards only).
    pub languages_count: bool,
    /// Include-full-report and field selection.
    pub json_controls: bool,
    /// The 16-key custom palette editor.
    pub palette_editor: bool,
}

pub fn resolve(kind: CardKind, format: CardFormat, theme: &str) -> Availability {
    let svg = format == CardFormat::Svg;
    Availability {
        svg_controls: svg,
        languages_count: kind == CardKind::Repo,
        json_controls: format == CardFormat::Json,
        palette_editor: svg && theme == "custom",
    }
}

impl Availability {
    /// Whether one specific hide flag is selectable under `kind`. Hide flags
    /// as a group additionally require the SVG format.
    pub fn hide_flag_selectable(&self, flag: HideFlag, kind: CardKind) -> bool {
        self.svg_controls && flag.applies_to(kind)
    }

    /// Include-full-report only means something for quality documents.
    pub fn include_report_enabled(&self, kind: CardKind) -> bool {
        self.json_controls && kind == CardKind::Quality
    }
}

/// Force every unavailable group back to its neutral value. Called right
/// after any edit that may change the (kind, format, theme) triple, so a flag
/// is never left selected-but-hidden.
pub fn normalize(config: &mut CardConfig) {
    let availability = resolve(config.kind, config.format, config.theme);

    if availability.svg_controls {
        config
            .hide
            .retain(|flag| flag.applies_to(config.kind));
    } else {
        config.hide.clear();
        config.title = None;
        config.animate = false;
    }

    if availability.json_controls {
        config.fields.retain_for_kind(config.kind);
    } else {
        config.fields = FieldSelection::All;
    }

    if !availability.include_report_enabled(config.kind) {
        config.include_report = false;
    }

    if !availability.palette_editor {
        config.palette = None;
    }
}
