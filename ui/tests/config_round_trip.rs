//! Export/import round-trip checks.
//!
//! An exported URL pasted back into the importer must rebuild the same
//! configuration (after availability normalization on both sides). This is
//! the contract that makes "copy URL, share it, paste it back" lossless.

use ui::core::availability;
use ui::core::config::{
    AnimationMode, CardConfig, CardFormat, CardKind, FieldSelection, HideFlag,
};
use ui::core::export::export_url;
use ui::core::import::parse_import;
use ui::core::palette::{preset, Palette};
use ui::core::settings::Settings;

fn normalized(mut config: CardConfig) -> CardConfig {
    availability::normalize(&mut config);
    config
}

fn round_trip(config: &CardConfig) -> CardConfig {
    let url = export_url(&Settings::default().base_url, config);
    let patch = parse_import(&url).expect("an exported URL must re-import");
    let mut rebuilt = CardConfig::default();
    rebuilt.apply(patch);
    availability::normalize(&mut rebuilt);
    rebuilt
}

#[test]
fn minimal_config_survives_a_round_trip() {
    let mut config = CardConfig::default();
    config.owner = "octocat".to_string();
    config.repo = "hello-world".to_string();
    let config = normalized(config);

    assert_eq!(round_trip(&config), config);
}

#[test]
fn rich_svg_repo_config_survives_a_round_trip() {
    let mut config = CardConfig::default();
    config.owner = "octocat".to_string();
    config.repo = "hello-world".to_string();
    config.theme = "nord";
    config.locale = "fr".to_string();
    config.title = Some("My project".to_string());
    config.width = 900;
    config.langs_count = 7;
    config.animate = true;
    config.animation = AnimationMode::Soft;
    config.duration_ms = 2000;
    config.cache_seconds = 0;
    config.hide = [HideFlag::Stars, HideFlag::Forks, HideFlag::Footer]
        .into_iter()
        .collect();
    let config = normalized(config);

    assert_eq!(round_trip(&config), config);
}

#[test]
fn json_quality_config_survives_a_round_trip() {
    let mut config = CardConfig::default();
    config.owner = "octocat".to_string();
    config.repo = "hello-world".to_string();
    config.kind = CardKind::Quality;
    config.format = CardFormat::Json;
    config.include_report = true;
    config.fields = FieldSelection::parse("score_total,commit_sha,category_scores");
    let config = normalized(config);

    assert_eq!(round_trip(&config), config);
}

#[test]
fn explicit_empty_field_selection_survives_a_round_trip() {
    let mut config = CardConfig::default();
    config.owner = "octocat".to_string();
    config.repo = "hello-world".to_string();
    config.format = CardFormat::Json;
    config.fields = FieldSelection::None;
    let config = normalized(config);

    let rebuilt = round_trip(&config);
    assert_eq!(rebuilt.fields, FieldSelection::None);
    assert_eq!(rebuilt, config);
}

#[test]
fn custom_palette_survives_a_round_trip() {
    let mut config = CardConfig::default();
    config.owner = "octocat".to_string();
    config.repo = "hello-world".to_string();
    config.theme = "custom";
    let mut palette = preset("midnight").expect("midnight preset exists").palette();
    palette.set(ui::core::palette::PaletteKey::Accent, "#123ABC");
    config.palette = Some(palette);
    let config = normalized(config);

    let rebuilt = round_trip(&config);
    let rebuilt_palette = rebuilt.palette.as_ref().expect("palette re-imported");
    assert_eq!(
        rebuilt_palette.get(ui::core::palette::PaletteKey::Accent),
        "#123ABC"
    );
    assert_eq!(rebuilt, config);
}

#[test]
fn non_custom_theme_drops_palette_before_export() {
    let mut config = CardConfig::default();
    config.owner = "octocat".to_string();
    config.repo = "hello-world".to_string();
    config.palette = Some(Palette::default());
    let config = normalized(config);

    // Normalization already cleared the gated palette; the trip stays lossless.
    assert_eq!(config.palette, None);
    assert_eq!(round_trip(&config), config);
}
