//! Session settings: where the reporting service lives. Explicit
//! construction-time configuration instead of sniffing the environment at
//! use sites.

/// Base URL used when nothing overrides it.
pub const DEFAULT_BASE_URL: &str = "https://cards.repo-inspector.dev";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Build settings for this session. Native builds honour the
    /// `CARDLAB_API_BASE` environment variable; wasm builds use the default.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(base) = std::env::var("CARDLAB_API_BASE") {
                let trimmed = base.trim().trim_end_matches('/').to_string();
                if !trimmed.is_empty() {
                    return Self { base_url: trimmed };
                }
            }
        }
        Self::default()
    }

    pub fn history_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/api/repos/{}/{}/history",
            self.base_url.trim_end_matches('/'),
            owner,
            repo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_url_is_path_style() {
        let settings = Settings::default();
        assert_eq!(
            settings.history_url("acme", "widgets"),
            format!("{DEFAULT_BASE_URL}/api/repos/acme/widgets/history")
        );
    }
}
