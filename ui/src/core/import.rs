//! Parses one of the accepted textual input shapes into a `CardPatch`.
//!
//! Shapes are tried in strict priority order: request-shaped URL, embed-path
//! URL, GitHub repository URL, bare `owner/repo` shorthand. The order is a
//! correctness requirement: a request-shaped reference must never be
//! misread as a shorthand just because it contains `word/word` somewhere.

use std::collections::BTreeSet;

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

use super::config::{
    clamp_cache_seconds, clamp_duration, clamp_langs_count, clamp_width, normalize_theme,
    parse_bool, AnimationMode, CardFormat, CardKind, CardPatch, FieldSelection, HideFlag,
};
use super::palette::{normalize_hex, PaletteKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("not a card URL, GitHub repository URL, or owner/repo shorthand")]
    Unrecognized,
}

/// Parse `text` into an all-or-nothing patch. The caller applies the patch
/// only on `Ok`, so the live config is never partially mutated.
pub fn parse_import(text: &str) -> Result<CardPatch, ImportError> {
    let reference = unwrap_reference(text);
    if reference.is_empty() {
        return Err(ImportError::Unrecognized);
    }

    if let Some(url) = parse_as_url(&reference) {
        if let Some(patch) = request_shaped(&url) {
            return Ok(patch);
        }
        if let Some(patch) = path_shaped(&url) {
            return Ok(patch);
        }
        if let Some(patch) = github_repo(&url) {
            return Ok(patch);
        }
    }

    bare_shorthand(&reference).ok_or(ImportError::Unrecognized)
}

/// Extract the underlying reference: unwrap a Markdown image
/// `![alt](ref "title")` or an angle-bracketed `<ref>`, otherwise use the
/// trimmed text verbatim.
fn unwrap_reference(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with("![") {
        if let Some(open) = trimmed.find("](") {
            if let Some(close) = trimmed.rfind(')') {
                if close > open + 1 {
                    let inner = trimmed[open + 2..close].trim();
                    // Drop an optional quoted title after the reference.
                    let reference = match inner.find(" \"").or_else(|| inner.find(" '")) {
                        Some(cut) => inner[..cut].trim(),
                        None => inner,
                    };
                    return strip_angle_brackets(reference).to_string();
                }
            }
        }
    }

    strip_angle_brackets(trimmed).to_string()
}

fn strip_angle_brackets(value: &str) -> &str {
    value
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(value)
        .trim()
}

/// Absolute references parse directly; a bare embed path like
/// `/api/stats/...` is resolved against a placeholder host.
fn parse_as_url(reference: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(reference) {
        return Some(url);
    }
    if reference.starts_with('/') {
        let base = Url::parse("https://cardlab.invalid").ok()?;
        return base.join(reference).ok();
    }
    None
}

/// Step 2: a reference carrying both `owner` and `repo` query parameters.
fn request_shaped(url: &Url) -> Option<CardPatch> {
    let owner = query_value(url, "owner")?;
    let repo = query_value(url, "repo")?;
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    let kind = query_value(url, "kind")
        .and_then(|value| CardKind::parse(&value))
        .unwrap_or_default();
    let format = query_value(url, "format")
        .and_then(|value| CardFormat::parse(&value))
        .unwrap_or_default();

    let mut patch = CardPatch {
        owner: Some(owner),
        repo: Some(repo),
        kind: Some(kind),
        format: Some(format),
        ..CardPatch::default()
    };
    read_query_params(url, format, &mut patch);
    Some(patch)
}

/// Step 3: the fixed embed-path template
/// `/api/stats/{kind}/{owner}/{repo}.{format}`, plus any query parameters.
fn path_shaped(url: &Url) -> Option<CardPatch> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    let [api, stats, kind_raw, owner_raw, file] = segments.as_slice() else {
        return None;
    };
    if *api != "api" || *stats != "stats" {
        return None;
    }

    let kind = CardKind::parse(kind_raw)?;
    let (repo_raw, format_raw) = file.rsplit_once('.')?;
    let format = CardFormat::parse(format_raw)?;
    let owner = decode_segment(owner_raw)?;
    let repo = decode_segment(repo_raw)?;
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    let mut patch = CardPatch {
        owner: Some(owner),
        repo: Some(repo),
        kind: Some(kind),
        format: Some(format),
        ..CardPatch::default()
    };
    read_query_params(url, format, &mut patch);
    Some(patch)
}

/// Step 4: `https://github.com/{owner}/{repo}`, tolerating a trailing path,
/// query or fragment, and stripping a `.git` suffix from the repo.
fn github_repo(url: &Url) -> Option<CardPatch> {
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    if host != "github.com" && host != "www.github.com" {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
    let owner = decode_segment(segments.next()?)?;
    let repo_raw = decode_segment(segments.next()?)?;
    let repo = repo_raw.strip_suffix(".git").unwrap_or(&repo_raw).to_string();
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some(CardPatch {
        owner: Some(owner),
        repo: Some(repo),
        ..CardPatch::default()
    })
}

/// Step 5: two non-empty path-like segments, nothing URL-ish about them.
fn bare_shorthand(reference: &str) -> Option<CardPatch> {
    if reference
        .chars()
        .any(|ch| ch.is_whitespace() || matches!(ch, '?' | '#' | ':' | '@'))
    {
        return None;
    }
    let (owner, repo) = reference.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some(CardPatch {
        owner: Some(owner.to_string()),
        repo: Some(repo.to_string()),
        ..CardPatch::default()
    })
}

fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Read every recognized non-identity parameter into `patch`. Invalid values
/// degrade individually (numbers fall back to defaults and clamp, unknown
/// enum values and malformed palette colors are dropped); a partial palette
/// never fails the import.
fn read_query_params(url: &Url, format: CardFormat, patch: &mut CardPatch) {
    for (key, value) in url.query_pairs() {
        let value = value.trim();
        match key.as_ref() {
            "theme" => patch.theme = Some(normalize_theme(value)),
            "locale" => patch.locale = Some(value.to_string()),
            "title" => patch.title = Some(value.to_string()),
            "card_width" => patch.width = Some(clamp_width(value)),
            "langs_count" => patch.langs_count = Some(clamp_langs_count(value, format)),
            "animate" => patch.animate = Some(parse_bool(value)),
            "animation" => {
                if let Some(mode) = AnimationMode::parse(value) {
                    patch.animation = Some(mode);
                }
            }
            "duration" => patch.duration_ms = Some(clamp_duration(value)),
            "cache_seconds" => patch.cache_seconds = Some(clamp_cache_seconds(value)),
            "include_report" => patch.include_report = Some(parse_bool(value)),
            "hide" => {
                let flags: BTreeSet<HideFlag> =
                    value.split(',').filter_map(HideFlag::parse).collect();
                patch.hide = Some(flags);
            }
            "fields" => patch.fields = Some(FieldSelection::parse(value)),
            other => {
                if let Some(palette_key) = PaletteKey::parse(other) {
                    if let Some(color) = normalize_hex(value) {
                        patch.palette.push((palette_key, color));
                    }
                }
            }
        }
    }
}

fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_url_yields_owner_and_repo() {
        let patch = parse_import("https://github.com/acme/widgets").unwrap();
        assert_eq!(patch.owner.as_deref(), Some("acme"));
        assert_eq!(patch.repo.as_deref(), Some("widgets"));
        assert_eq!(patch.kind, None);
        assert_eq!(patch.format, None);
    }

    #[test]
    fn github_url_strips_git_suffix_and_trailing_path() {
        let patch =
            parse_import("https://github.com/acme/widgets.git/tree/main?tab=readme#top").unwrap();
        assert_eq!(patch.owner.as_deref(), Some("acme"));
        assert_eq!(patch.repo.as_deref(), Some("widgets"));
    }

    #[test]
    fn request_shaped_reads_all_recognized_params() {
        let patch = parse_import(
            "https://host/api?owner=acme&repo=widgets&kind=quality&format=json&theme=ocean",
        )
        .unwrap();
        assert_eq!(patch.owner.as_deref(), Some("acme"));
        assert_eq!(patch.repo.as_deref(), Some("widgets"));
        assert_eq!(patch.kind, Some(CardKind::Quality));
        assert_eq!(patch.format, Some(CardFormat::Json));
        assert_eq!(patch.theme, Some("ocean"));
    }

    #[test]
    fn markdown_image_unwraps_to_path_shape() {
        let patch =
            parse_import("![x](https://host/api/stats/repo/acme/widgets.svg?theme=nord)").unwrap();
        assert_eq!(patch.owner.as_deref(), Some("acme"));
        assert_eq!(patch.repo.as_deref(), Some("widgets"));
        assert_eq!(patch.kind, Some(CardKind::Repo));
        assert_eq!(patch.format, Some(CardFormat::Svg));
        assert_eq!(patch.theme, Some("nord"));
    }

    #[test]
    fn markdown_image_with_quoted_title() {
        let patch = parse_import("![card](https://github.com/acme/widgets \"my card\")").unwrap();
        assert_eq!(patch.owner.as_deref(), Some("acme"));
    }

    #[test]
    fn angle_brackets_are_stripped() {
        let patch = parse_import("<https://github.com/acme/widgets>").unwrap();
        assert_eq!(patch.repo.as_deref(), Some("widgets"));
    }

    #[test]
    fn relative_embed_path_parses() {
        let patch = parse_import("/api/stats/quality/acme/widgets.json?fields=score_total").unwrap();
        assert_eq!(patch.kind, Some(CardKind::Quality));
        assert_eq!(patch.format, Some(CardFormat::Json));
        assert_eq!(
            patch.fields,
            Some(FieldSelection::Only(
                ["score_total".to_string()].into_iter().collect()
            ))
        );
    }

    #[test]
    fn bare_shorthand_parses_two_segments() {
        let patch = parse_import("acme/widgets").unwrap();
        assert_eq!(patch.owner.as_deref(), Some("acme"));
        assert_eq!(patch.repo.as_deref(), Some("widgets"));
    }

    #[test]
    fn request_shape_wins_over_shorthand_lookalikes() {
        // Contains word/word substrings but carries owner/repo params.
        let patch = parse_import("https://host/api?owner=real&repo=one&title=a/b").unwrap();
        assert_eq!(patch.owner.as_deref(), Some("real"));
        assert_eq!(patch.repo.as_deref(), Some("one"));
    }

    #[test]
    fn numeric_params_clamp_instead_of_failing() {
        let patch = parse_import(
            "https://host/api?owner=a&repo=b&card_width=99999&duration=1&langs_count=abc",
        )
        .unwrap();
        assert_eq!(patch.width, Some(1400));
        assert_eq!(patch.duration_ms, Some(350));
        assert_eq!(patch.langs_count, Some(4));
    }

    #[test]
    fn malformed_palette_entries_drop_individually() {
        let patch = parse_import(
            "https://host/api?owner=a&repo=b&theme=custom&accent=%2316a4e0&track=oops&pass=%23abc",
        )
        .unwrap();
        assert_eq!(
            patch.palette,
            vec![
                (PaletteKey::Accent, "#16A4E0".to_string()),
                (PaletteKey::Pass, "#AABBCC".to_string()),
            ]
        );
    }

    #[test]
    fn unrecognized_input_is_a_typed_failure() {
        assert_eq!(parse_import("hello world"), Err(ImportError::Unrecognized));
        assert_eq!(parse_import(""), Err(ImportError::Unrecognized));
        assert_eq!(parse_import("justoneword"), Err(ImportError::Unrecognized));
        assert_eq!(
            parse_import("https://host/api?owner=a"),
            Err(ImportError::Unrecognized)
        );
    }

    #[test]
    fn unknown_hide_flags_are_dropped() {
        let patch =
            parse_import("https://host/api?owner=a&repo=b&hide=stars,unknown,forks").unwrap();
        assert_eq!(
            patch.hide,
            Some([HideFlag::Stars, HideFlag::Forks].into_iter().collect())
        );
    }
}
