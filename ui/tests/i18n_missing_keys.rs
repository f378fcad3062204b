use std::collections::{BTreeSet, HashSet};

/// Every translated locale must cover at least the keys of the en-US
/// fallback, so a missing translation is caught at test time instead of
/// rendering as a raw Fluent id in the navbar.
///
/// Keys are scraped with a line-level heuristic rather than a full Fluent
/// parse: comment, blank, attribute and continuation lines are skipped, and
/// anything shaped like `key =` counts as a message definition.
///
/// New locales go in `ui/i18n/<locale>/cardlab-ui.ftl`, seeded from the
/// en-US file, and get registered in the list below.
#[test]
fn all_locales_have_all_fallback_keys() {
    const EN_US: &str = include_str!("../i18n/en-US/cardlab-ui.ftl");
    const ES_ES: &str = include_str!("../i18n/es-ES/cardlab-ui.ftl");
    const FR_FR: &str = include_str!("../i18n/fr-FR/cardlab-ui.ftl");

    let fallback_keys = message_keys(EN_US);
    assert!(!fallback_keys.is_empty(), "en-US defines no message keys");
    assert_unique_keys(EN_US, "en-US");

    let locales: &[(&str, &str)] = &[("es-ES", ES_ES), ("fr-FR", FR_FR)];

    let mut gaps = Vec::new();
    for (locale, src) in locales {
        assert_unique_keys(src, locale);

        let keys = message_keys(src);
        let missing: BTreeSet<&String> =
            fallback_keys.iter().filter(|k| !keys.contains(*k)).collect();

        if !missing.is_empty() {
            gaps.push(format!(
                "{locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n  ")
            ));
        }
    }

    if !gaps.is_empty() {
        panic!(
            "Untranslated keys (copy from en-US, then translate):\n\n{}",
            gaps.join("\n\n")
        );
    }
}

fn message_keys(src: &str) -> HashSet<String> {
    src.lines()
        .filter_map(definition_key)
        .map(str::to_string)
        .collect()
}

/// The left side of `key = value`, or None for comment, blank, attribute
/// and continuation lines.
fn definition_key(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('.') {
        return None;
    }
    let (key, _) = line.split_once('=')?;
    let key = key.trim();
    let is_plain = !key.is_empty()
        && !key.contains(' ')
        && !key.contains('\t')
        && !key.starts_with('[')
        && !key.starts_with('@');
    is_plain.then_some(key)
}

fn assert_unique_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let mut dups = BTreeSet::new();

    for line in src.lines() {
        if let Some(key) = definition_key(line) {
            if !seen.insert(key.to_string()) {
                dups.insert(format!("{key}  (line: \"{line}\")"));
            }
        }
    }

    if !dups.is_empty() {
        panic!(
            "Duplicate key definitions in {locale}:\n  {}",
            dups.into_iter().collect::<Vec<_>>().join("\n  ")
        );
    }
}
