//! Serializes a `CardConfig` into the one canonical request URL. Pure and
//! deterministic: parameter order is fixed here, never left to map iteration.

use url::Url;

use super::availability;
use super::config::{
    AnimationMode, CardConfig, CACHE_DEFAULT, DEFAULT_LOCALE, DEFAULT_THEME, DURATION_DEFAULT,
    LANGS_DEFAULT, WIDTH_DEFAULT,
};
use super::settings::DEFAULT_BASE_URL;

/// Build the canonical export URL for `config` against `base`.
///
/// `owner`, `repo`, `kind` and `format` are always present. Every other
/// parameter appears only when its group is availability-enabled for the
/// current (kind, format, theme) triple and its value differs from the
/// documented no-op default.
pub fn export_url(base: &str, config: &CardConfig) -> String {
    let mut url = Url::parse(base)
        .unwrap_or_else(|_| Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"));
    url.set_path("/api");
    url.set_query(None);
    url.set_fragment(None);

    let availability = availability::resolve(config.kind, config.format, config.theme);

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("owner", &config.owner);
        pairs.append_pair("repo", &config.repo);
        pairs.append_pair("kind", config.kind.as_str());
        pairs.append_pair("format", config.format.as_str());

        if availability.svg_controls && config.theme != DEFAULT_THEME {
            pairs.append_pair("theme", config.theme);
        }
        if config.locale != DEFAULT_LOCALE {
            pairs.append_pair("locale", &config.locale);
        }
        if availability.svg_controls {
            if config.width != WIDTH_DEFAULT {
                pairs.append_pair("card_width", &config.width.to_string());
            }
            if let Some(title) = &config.title {
                pairs.append_pair("title", title);
            }
            if !config.hide.is_empty() {
                let joined = config
                    .hide
                    .iter()
                    .map(|flag| flag.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                pairs.append_pair("hide", &joined);
            }
        }
        if availability.json_controls {
            if let Some(fields) = config.fields.to_param() {
                pairs.append_pair("fields", &fields);
            }
        }
        if availability.svg_controls {
            if config.animate {
                pairs.append_pair("animate", "true");
            }
            if config.animation != AnimationMode::All {
                pairs.append_pair("animation", config.animation.as_str());
            }
            if config.duration_ms != DURATION_DEFAULT {
                pairs.append_pair("duration", &config.duration_ms.to_string());
            }
            if config.cache_seconds != CACHE_DEFAULT {
                pairs.append_pair("cache_seconds", &config.cache_seconds.to_string());
            }
        }
        if availability.languages_count && config.langs_count != LANGS_DEFAULT {
            pairs.append_pair("langs_count", &config.langs_count.to_string());
        }
        if availability.include_report_enabled(config.kind) && config.include_report {
            pairs.append_pair("include_report", "true");
        }
        if availability.palette_editor {
            if let Some(palette) = &config.palette {
                for (key, color) in palette.entries() {
                    pairs.append_pair(key.as_str(), color);
                }
            }
        }
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CardFormat, CardKind, FieldSelection, HideFlag};
    use crate::core::palette::Palette;
    use crate::core::settings::Settings;

    fn base() -> String {
        Settings::default().base_url
    }

    #[test]
    fn minimal_config_exports_only_required_params() {
        let mut config = CardConfig::default();
        config.owner = "acme".to_string();
        config.repo = "widgets".to_string();

        let url = export_url(&base(), &config);
        assert_eq!(
            url,
            format!("{DEFAULT_BASE_URL}/api?owner=acme&repo=widgets&kind=repo&format=svg")
        );
    }

    #[test]
    fn export_is_byte_deterministic() {
        let mut config = CardConfig::default();
        config.owner = "acme".to_string();
        config.repo = "widgets".to_string();
        config.theme = "nord";
        config.width = 900;
        config.hide = [HideFlag::Stars, HideFlag::Forks].into_iter().collect();
        config.animate = true;

        let first = export_url(&base(), &config);
        let second = export_url(&base(), &config);
        assert_eq!(first, second);
        assert!(first.contains("hide=stars%2Cforks") || first.contains("hide=stars,forks"));
    }

    #[test]
    fn disabled_groups_never_appear() {
        let mut config = CardConfig::default();
        config.owner = "acme".to_string();
        config.repo = "widgets".to_string();
        config.format = CardFormat::Json;
        config.kind = CardKind::Quality;
        // Stale svg-side state; availability gates it out even unnormalized.
        config.width = 1000;
        config.animate = true;
        config.hide.insert(HideFlag::Footer);

        let url = export_url(&base(), &config);
        assert!(!url.contains("card_width"));
        assert!(!url.contains("animate"));
        assert!(!url.contains("hide="));
        assert!(!url.contains("theme="));
    }

    #[test]
    fn fields_all_is_omitted_but_none_is_explicit() {
        let mut config = CardConfig::default();
        config.owner = "a".to_string();
        config.repo = "b".to_string();
        config.format = CardFormat::Json;

        assert!(!export_url(&base(), &config).contains("fields="));

        config.fields = FieldSelection::None;
        assert!(export_url(&base(), &config).contains("fields=none"));
    }

    #[test]
    fn palette_only_exports_under_custom_svg() {
        let mut config = CardConfig::default();
        config.owner = "a".to_string();
        config.repo = "b".to_string();
        config.palette = Some(Palette::default());

        assert!(!export_url(&base(), &config).contains("bg_start"));

        config.theme = "custom";
        let url = export_url(&base(), &config);
        assert!(url.contains("theme=custom"));
        assert!(url.contains("bg_start=%23F8FBFF"));
        assert!(url.contains("fail=%23BE1D2D"));
    }
}
