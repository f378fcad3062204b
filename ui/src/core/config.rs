//! Canonical in-memory card configuration: enums, defaults, legal ranges and
//! the atomic patch-merge that every edit and import goes through.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::palette::{Palette, PaletteKey};

/// Which dataset a card describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum CardKind {
    #[default]
    Repo,
    Quality,
}

impl CardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Repo => "repo",
            CardKind::Quality => "quality",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "repo" => Some(CardKind::Repo),
            "quality" => Some(CardKind::Quality),
            _ => None,
        }
    }
}

/// Output representation requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum CardFormat {
    #[default]
    Svg,
    Json,
}

impl CardFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            CardFormat::Svg => "svg",
            CardFormat::Json => "json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "svg" => Some(CardFormat::Svg),
            "json" => Some(CardFormat::Json),
            _ => None,
        }
    }
}

/// Animation selector understood by the SVG renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationMode {
    #[default]
    All,
    Soft,
    Bars,
    Ring,
    None,
}

impl AnimationMode {
    pub const ALL: [AnimationMode; 5] = [
        AnimationMode::All,
        AnimationMode::Soft,
        AnimationMode::Bars,
        AnimationMode::Ring,
        AnimationMode::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationMode::All => "all",
            AnimationMode::Soft => "soft",
            AnimationMode::Bars => "bars",
            AnimationMode::Ring => "ring",
            AnimationMode::None => "none",
        }
    }

    /// The service accepts `off` as an alias for `none`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(AnimationMode::All),
            "soft" => Some(AnimationMode::Soft),
            "bars" => Some(AnimationMode::Bars),
            "ring" => Some(AnimationMode::Ring),
            "none" | "off" => Some(AnimationMode::None),
            _ => None,
        }
    }
}

/// Named content block a user may suppress from an SVG card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HideFlag {
    Description,
    Languages,
    Meta,
    Stars,
    Forks,
    Issues,
    Watchers,
    Status,
    Lines,
    Stacks,
    Commit,
    Categories,
    Ring,
    Footer,
}

impl HideFlag {
    pub const ALL: [HideFlag; 14] = [
        HideFlag::Description,
        HideFlag::Languages,
        HideFlag::Meta,
        HideFlag::Stars,
        HideFlag::Forks,
        HideFlag::Issues,
        HideFlag::Watchers,
        HideFlag::Status,
        HideFlag::Lines,
        HideFlag::Stacks,
        HideFlag::Commit,
        HideFlag::Categories,
        HideFlag::Ring,
        HideFlag::Footer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HideFlag::Description => "description",
            HideFlag::Languages => "languages",
            HideFlag::Meta => "meta",
            HideFlag::Stars => "stars",
            HideFlag::Forks => "forks",
            HideFlag::Issues => "issues",
            HideFlag::Watchers => "watchers",
            HideFlag::Status => "status",
            HideFlag::Lines => "lines",
            HideFlag::Stacks => "stacks",
            HideFlag::Commit => "commit",
            HideFlag::Categories => "categories",
            HideFlag::Ring => "ring",
            HideFlag::Footer => "footer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim().to_ascii_lowercase();
        HideFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == needle)
    }

    /// The card kinds for which this block exists at all.
    pub fn applies_to(self, kind: CardKind) -> bool {
        match self {
            HideFlag::Description
            | HideFlag::Languages
            | HideFlag::Meta
            | HideFlag::Stars
            | HideFlag::Forks
            | HideFlag::Issues
            | HideFlag::Watchers => kind == CardKind::Repo,
            HideFlag::Status
            | HideFlag::Lines
            | HideFlag::Stacks
            | HideFlag::Commit
            | HideFlag::Categories
            | HideFlag::Ring => kind == CardKind::Quality,
            HideFlag::Footer => true,
        }
    }
}

/// Top-level document field names for `kind=repo` JSON output.
pub const REPO_FIELDS: [&str; 23] = [
    "owner",
    "name",
    "full_name",
    "html_url",
    "description",
    "stars",
    "forks",
    "open_issues",
    "watchers",
    "default_branch",
    "primary_language",
    "license_name",
    "topics",
    "archived",
    "is_fork",
    "size_kb",
    "created_at",
    "updated_at",
    "pushed_at",
    "homepage",
    "has_releases",
    "has_tags",
    "languages",
];

/// Top-level document field names for `kind=quality` JSON output.
pub const QUALITY_FIELDS: [&str; 13] = [
    "job_id",
    "commit_sha",
    "finished_at",
    "score_total",
    "report_url",
    "total_code_lines",
    "total_code_files",
    "scanned_code_files",
    "status_counts",
    "category_scores",
    "detected_stacks",
    "source",
    "report",
];

pub fn field_vocabulary(kind: CardKind) -> &'static [&'static str] {
    match kind {
        CardKind::Repo => &REPO_FIELDS,
        CardKind::Quality => &QUALITY_FIELDS,
    }
}

/// JSON field selection. `None` is a real sentinel (an explicit empty
/// selection) and must not collapse into `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSelection {
    #[default]
    All,
    None,
    Only(BTreeSet<String>),
}

impl FieldSelection {
    /// Parse the `fields` query value. The service accepts both `none` and
    /// `__none__` for the empty selection; unknown names are kept as written
    /// (the service ignores them when filtering).
    pub fn parse(value: &str) -> Self {
        let names: BTreeSet<String> = value
            .split(',')
            .map(|part| part.trim().to_ascii_lowercase())
            .filter(|part| !part.is_empty())
            .collect();
        if names.is_empty() {
            return FieldSelection::All;
        }
        if names.contains("none") || names.contains("__none__") {
            return FieldSelection::None;
        }
        FieldSelection::Only(names)
    }

    /// Canonical query value, or `None` when the selection is the no-op
    /// default and should be omitted from an export.
    pub fn to_param(&self) -> Option<String> {
        match self {
            FieldSelection::All => None,
            FieldSelection::None => Some("none".to_string()),
            FieldSelection::Only(names) => {
                Some(names.iter().cloned().collect::<Vec<_>>().join(","))
            }
        }
    }

    /// Drop names outside the vocabulary of `kind`. An `Only` selection that
    /// loses every name degrades to `All` (nothing left worth pinning).
    pub fn retain_for_kind(&mut self, kind: CardKind) {
        if let FieldSelection::Only(names) = self {
            let vocab = field_vocabulary(kind);
            names.retain(|name| vocab.contains(&name.as_str()));
            if names.is_empty() {
                *self = FieldSelection::All;
            }
        }
    }
}

/// Theme identifiers the service ships. `custom` unlocks the palette editor.
pub const THEME_NAMES: [&str; 6] = ["ocean", "midnight", "nord", "sunset", "forest", "custom"];

pub const DEFAULT_THEME: &str = "ocean";
pub const DEFAULT_LOCALE: &str = "en";

pub const WIDTH_DEFAULT: u32 = 760;
pub const WIDTH_MIN: u32 = 640;
pub const WIDTH_MAX: u32 = 1400;

pub const DURATION_DEFAULT: u32 = 1400;
pub const DURATION_MIN: u32 = 350;
pub const DURATION_MAX: u32 = 7000;

pub const CACHE_DEFAULT: u32 = 21600;
pub const CACHE_MIN: u32 = 0;
pub const CACHE_MAX: u32 = 86400;

pub const LANGS_DEFAULT: u32 = 4;
pub const LANGS_MIN: u32 = 1;
/// The SVG renderer caps the language list lower than the JSON document does.
/// Kept asymmetric on purpose; see DESIGN.md.
pub const LANGS_MAX_SVG: u32 = 10;
pub const LANGS_MAX_JSON: u32 = 30;

/// Map a theme name onto the fixed set, falling back to the service default.
pub fn normalize_theme(value: &str) -> &'static str {
    let needle = value.trim().to_ascii_lowercase();
    THEME_NAMES
        .into_iter()
        .find(|name| *name == needle)
        .unwrap_or(DEFAULT_THEME)
}

/// Parse a user-supplied integer, falling back to `default` when the text is
/// not a number at all, then clamping into `[min, max]`.
pub fn parse_clamped(input: &str, default: u32, min: u32, max: u32) -> u32 {
    let value = input.trim().parse::<i64>().unwrap_or(i64::from(default));
    value.clamp(i64::from(min), i64::from(max)) as u32
}

pub fn clamp_width(input: &str) -> u32 {
    parse_clamped(input, WIDTH_DEFAULT, WIDTH_MIN, WIDTH_MAX)
}

pub fn clamp_duration(input: &str) -> u32 {
    parse_clamped(input, DURATION_DEFAULT, DURATION_MIN, DURATION_MAX)
}

pub fn clamp_cache_seconds(input: &str) -> u32 {
    parse_clamped(input, CACHE_DEFAULT, CACHE_MIN, CACHE_MAX)
}

pub fn langs_count_max(format: CardFormat) -> u32 {
    match format {
        CardFormat::Svg => LANGS_MAX_SVG,
        CardFormat::Json => LANGS_MAX_JSON,
    }
}

pub fn clamp_langs_count(input: &str, format: CardFormat) -> u32 {
    parse_clamped(input, LANGS_DEFAULT, LANGS_MIN, langs_count_max(format))
}

/// Lenient query-string boolean: `1`, `true`, `yes`, `on` are truthy.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// The one live configuration for a studio session.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    pub owner: String,
    pub repo: String,
    pub kind: CardKind,
    pub format: CardFormat,
    pub theme: &'static str,
    pub locale: String,
    pub title: Option<String>,
    pub width: u32,
    pub langs_count: u32,
    pub animate: bool,
    pub animation: AnimationMode,
    pub duration_ms: u32,
    pub cache_seconds: u32,
    pub include_report: bool,
    pub hide: BTreeSet<HideFlag>,
    pub fields: FieldSelection,
    pub palette: Option<Palette>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            kind: CardKind::Repo,
            format: CardFormat::Svg,
            theme: DEFAULT_THEME,
            locale: DEFAULT_LOCALE.to_string(),
            title: None,
            width: WIDTH_DEFAULT,
            langs_count: LANGS_DEFAULT,
            animate: false,
            animation: AnimationMode::All,
            duration_ms: DURATION_DEFAULT,
            cache_seconds: CACHE_DEFAULT,
            include_report: false,
            hide: BTreeSet::new(),
            fields: FieldSelection::All,
            palette: None,
        }
    }
}

/// Validated partial update. Built by the import codec and by individual form
/// controls; applied atomically so a failed parse never half-mutates state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub kind: Option<CardKind>,
    pub format: Option<CardFormat>,
    pub theme: Option<&'static str>,
    pub locale: Option<String>,
    pub title: Option<String>,
    pub width: Option<u32>,
    pub langs_count: Option<u32>,
    pub animate: Option<bool>,
    pub animation: Option<AnimationMode>,
    pub duration_ms: Option<u32>,
    pub cache_seconds: Option<u32>,
    pub include_report: Option<bool>,
    pub hide: Option<BTreeSet<HideFlag>>,
    pub fields: Option<FieldSelection>,
    /// Individually validated palette overrides, applied over the current
    /// palette (or the default custom palette when none exists yet).
    pub palette: Vec<(PaletteKey, String)>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        *self == CardPatch::default()
    }
}

impl CardConfig {
    /// Merge a validated patch. Numeric values are re-clamped against the
    /// (possibly just-changed) format so a patch can never leave an
    /// out-of-range value behind.
    pub fn apply(&mut self, patch: CardPatch) {
        if let Some(owner) = patch.owner {
            self.owner = owner.trim().to_string();
        }
        if let Some(repo) = patch.repo {
            self.repo = repo.trim().to_string();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(format) = patch.format {
            self.format = format;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(locale) = patch.locale {
            let trimmed = locale.trim().to_string();
            if !trimmed.is_empty() {
                self.locale = trimmed;
            }
        }
        if let Some(title) = patch.title {
            let trimmed = title.trim().to_string();
            self.title = (!trimmed.is_empty()).then_some(trimmed);
        }
        if let Some(width) = patch.width {
            self.width = width.clamp(WIDTH_MIN, WIDTH_MAX);
        }
        if let Some(langs) = patch.langs_count {
            self.langs_count = langs.clamp(LANGS_MIN, langs_count_max(self.format));
        }
        if let Some(animate) = patch.animate {
            self.animate = animate;
        }
        if let Some(animation) = patch.animation {
            self.animation = animation;
        }
        if let Some(duration) = patch.duration_ms {
            self.duration_ms = duration.clamp(DURATION_MIN, DURATION_MAX);
        }
        if let Some(cache) = patch.cache_seconds {
            self.cache_seconds = cache.clamp(CACHE_MIN, CACHE_MAX);
        }
        if let Some(include_report) = patch.include_report {
            self.include_report = include_report;
        }
        if let Some(hide) = patch.hide {
            self.hide = hide;
        }
        if let Some(fields) = patch.fields {
            self.fields = fields;
        }
        if !patch.palette.is_empty() {
            let mut palette = self.palette.clone().unwrap_or_default();
            for (key, color) in patch.palette {
                palette.set(key, color);
            }
            self.palette = Some(palette);
        }
        // langs_count may have been in range for the old format only.
        self.langs_count = self
            .langs_count
            .clamp(LANGS_MIN, langs_count_max(self.format));
    }
}
