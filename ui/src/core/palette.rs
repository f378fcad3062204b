//! The 16-key custom color palette: named presets, randomization, and the
//! capture/reset pair backing the editor's "restore defaults" button.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Semantic color slots of a card theme, in canonical export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaletteKey {
    BgStart,
    BgEnd,
    Border,
    Panel,
    Overlay,
    ChipBg,
    ChipText,
    Text,
    Muted,
    Accent,
    Accent2,
    AccentSoft,
    Track,
    Pass,
    Warn,
    Fail,
}

impl PaletteKey {
    pub const ALL: [PaletteKey; 16] = [
        PaletteKey::BgStart,
        PaletteKey::BgEnd,
        PaletteKey::Border,
        PaletteKey::Panel,
        PaletteKey::Overlay,
        PaletteKey::ChipBg,
        PaletteKey::ChipText,
        PaletteKey::Text,
        PaletteKey::Muted,
        PaletteKey::Accent,
        PaletteKey::Accent2,
        PaletteKey::AccentSoft,
        PaletteKey::Track,
        PaletteKey::Pass,
        PaletteKey::Warn,
        PaletteKey::Fail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteKey::BgStart => "bg_start",
            PaletteKey::BgEnd => "bg_end",
            PaletteKey::Border => "border",
            PaletteKey::Panel => "panel",
            PaletteKey::Overlay => "overlay",
            PaletteKey::ChipBg => "chip_bg",
            PaletteKey::ChipText => "chip_text",
            PaletteKey::Text => "text",
            PaletteKey::Muted => "muted",
            PaletteKey::Accent => "accent",
            PaletteKey::Accent2 => "accent_2",
            PaletteKey::AccentSoft => "accent_soft",
            PaletteKey::Track => "track",
            PaletteKey::Pass => "pass",
            PaletteKey::Warn => "warn",
            PaletteKey::Fail => "fail",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim().to_ascii_lowercase();
        PaletteKey::ALL.into_iter().find(|key| key.as_str() == needle)
    }

    fn index(self) -> usize {
        PaletteKey::ALL.iter().position(|key| *key == self).unwrap_or(0)
    }
}

/// Normalize a hex color to `#RRGGBB` uppercase. Three-digit shorthand is
/// expanded; anything else is rejected.
pub fn normalize_hex(value: &str) -> Option<String> {
    let candidate = value.trim();
    let digits = candidate.strip_prefix('#')?;
    if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let expanded: String = digits.chars().flat_map(|ch| [ch, ch]).collect();
            Some(format!("#{}", expanded.to_ascii_uppercase()))
        }
        6 => Some(format!("#{}", digits.to_ascii_uppercase())),
        _ => None,
    }
}

/// A total mapping over the 16 palette keys. Values are always normalized
/// `#RRGGBB` strings; `set` silently drops anything malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [String; 16],
}

impl Default for Palette {
    fn default() -> Self {
        PRESETS[0].palette()
    }
}

impl Palette {
    pub fn get(&self, key: PaletteKey) -> &str {
        &self.colors[key.index()]
    }

    pub fn set(&mut self, key: PaletteKey, color: impl AsRef<str>) {
        if let Some(normalized) = normalize_hex(color.as_ref()) {
            self.colors[key.index()] = normalized;
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (PaletteKey, &str)> {
        PaletteKey::ALL
            .into_iter()
            .map(move |key| (key, self.get(key)))
    }

    /// Sixteen independently drawn uniform 24-bit colors.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let mut palette = Palette::default();
        for key in PaletteKey::ALL {
            let color: u32 = rng.gen_range(0..=0xFF_FF_FF);
            palette.colors[key.index()] = format!("#{color:06X}");
        }
        palette
    }
}

/// A named, complete preset the editor can stamp over all 16 keys.
pub struct PalettePreset {
    pub name: &'static str,
    colors: [&'static str; 16],
}

impl PalettePreset {
    pub fn palette(&self) -> Palette {
        Palette {
            colors: self.colors.map(str::to_string),
        }
    }
}

/// Built-in presets. `ocean` mirrors the service's default theme; the rest
/// ship as editor starting points.
pub const PRESETS: [PalettePreset; 5] = [
    PalettePreset {
        name: "ocean",
        colors: [
            "#F8FBFF", "#EEF5FF", "#A8CBFF", "#FFFFFF", "#EDF4FF", "#E7F0FF", "#2D4E83",
            "#14284B", "#3F6191", "#16A4E0", "#1AB9A2", "#B8DBFF", "#D3E3FB", "#0F7F39",
            "#B55A0C", "#BE1D2D",
        ],
    },
    PalettePreset {
        name: "midnight",
        colors: [
            "#10141F", "#0B0E16", "#26304A", "#161B29", "#1B2133", "#202A44", "#9DB4E8",
            "#E8EEFB", "#8DA0C8", "#4F8DFF", "#38C8B4", "#27406B", "#222E4A", "#2FBF71",
            "#E0A93B", "#E25565",
        ],
    },
    PalettePreset {
        name: "nord",
        colors: [
            "#2E3440", "#272C38", "#4C566A", "#3B4252", "#434C5E", "#434C5E", "#D8DEE9",
            "#ECEFF4", "#AEB8CC", "#88C0D0", "#A3BE8C", "#4C566A", "#3B4252", "#A3BE8C",
            "#EBCB8B", "#BF616A",
        ],
    },
    PalettePreset {
        name: "sunset",
        colors: [
            "#FFF4EC", "#FFE8DC", "#F5B99A", "#FFFBF8", "#FFEFE4", "#FFE2D0", "#8A4420",
            "#4A2410", "#995C38", "#E8633A", "#D8456B", "#F8C4A8", "#F3D9C8", "#2F7D3F",
            "#C46A12", "#C22B3A",
        ],
    },
    PalettePreset {
        name: "forest",
        colors: [
            "#F3F8F2", "#E5F0E3", "#A9CBA4", "#FCFEFC", "#EAF3E8", "#DBEBD8", "#2F5C33",
            "#15301A", "#4C6F50", "#2E8B57", "#5FA052", "#BDDAB5", "#D4E6D0", "#1F7A33",
            "#B06A14", "#AE2B33",
        ],
    },
];

pub fn preset(name: &str) -> Option<&'static PalettePreset> {
    PRESETS.iter().find(|entry| entry.name == name)
}

/// Editor-side palette state: the working palette plus the one-shot default
/// capture that `reset_to_default` restores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteState {
    pub current: Palette,
    captured_default: Option<Palette>,
}

impl PaletteState {
    pub fn apply_preset(&mut self, name: &str) -> bool {
        match preset(name) {
            Some(entry) => {
                self.current = entry.palette();
                true
            }
            None => false,
        }
    }

    pub fn randomize(&mut self) {
        self.current = Palette::random();
    }

    /// Memoize whatever palette is live right now. A no-op after its first
    /// successful call for the session.
    pub fn capture_default(&mut self) {
        if self.captured_default.is_none() {
            self.captured_default = Some(self.current.clone());
        }
    }

    /// Restore the memoized palette, or the first preset when nothing was
    /// captured yet.
    pub fn reset_to_default(&mut self) {
        self.current = self
            .captured_default
            .clone()
            .unwrap_or_else(|| PRESETS[0].palette());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_expands_shorthand_and_uppercases() {
        assert_eq!(normalize_hex("#abc").as_deref(), Some("#AABBCC"));
        assert_eq!(normalize_hex(" #16a4e0 ").as_deref(), Some("#16A4E0"));
        assert_eq!(normalize_hex("#16A4E0").as_deref(), Some("#16A4E0"));
        assert_eq!(normalize_hex("16a4e0"), None);
        assert_eq!(normalize_hex("#16a4"), None);
        assert_eq!(normalize_hex("#xyzxyz"), None);
    }

    #[test]
    fn set_drops_malformed_entries_individually() {
        let mut palette = Palette::default();
        let before = palette.get(PaletteKey::Accent).to_string();
        palette.set(PaletteKey::Accent, "not-a-color");
        assert_eq!(palette.get(PaletteKey::Accent), before);
        palette.set(PaletteKey::Accent, "#123");
        assert_eq!(palette.get(PaletteKey::Accent), "#112233");
    }

    #[test]
    fn presets_are_complete_and_well_formed() {
        assert!(PRESETS.len() >= 5);
        for entry in &PRESETS {
            let palette = entry.palette();
            for (_, color) in palette.entries() {
                assert_eq!(normalize_hex(color).as_deref(), Some(color), "{}", entry.name);
            }
        }
    }

    #[test]
    fn random_palette_is_sixteen_valid_uppercase_colors() {
        let palette = Palette::random();
        let mut count = 0;
        for (_, color) in palette.entries() {
            count += 1;
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..]
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase()));
        }
        assert_eq!(count, 16);
    }

    #[test]
    fn reset_restores_first_captured_palette() {
        let mut state = PaletteState::default();
        state.apply_preset("nord");
        state.capture_default();
        let captured = state.current.clone();

        state.randomize();
        state.capture_default(); // no-op after the first call
        state.randomize();
        assert_ne!(state.current, captured);

        state.reset_to_default();
        assert_eq!(state.current, captured);
    }

    #[test]
    fn reset_without_capture_uses_first_preset() {
        let mut state = PaletteState::default();
        state.randomize();
        state.reset_to_default();
        assert_eq!(state.current, PRESETS[0].palette());
    }
}
