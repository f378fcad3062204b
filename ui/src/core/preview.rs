//! Decides how an exported URL is previewed: SVG cards are referenced as
//! images (with a ready-to-paste Markdown embed), JSON cards are fetched
//! once and pretty-printed.

use thiserror::Error;

use super::config::{CardConfig, CardFormat};

/// The one message shown in place of a JSON preview when anything goes
/// wrong. Network failures and malformed bodies present identically.
pub const PREVIEW_FAILURE_MESSAGE: &str =
    "Preview unavailable. Check the repository name and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("preview request failed")]
    Network,
    #[error("preview response was not a JSON document")]
    Malformed,
}

/// Serializes preview work across rapid edits: a generation counter that
/// coalesces debounce windows (only the newest fires) and a monotonic
/// request token that lets in-flight responses be discarded once a newer
/// request has been issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewGate {
    generation: u64,
    token: u64,
}

impl PreviewGate {
    /// Open a new debounce window, superseding every earlier one.
    pub fn open_window(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether the window is still the newest when its debounce elapses.
    pub fn window_is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Issue a request token, superseding every in-flight request.
    pub fn issue(&mut self) -> u64 {
        self.token += 1;
        self.token
    }

    /// Whether a response carrying `token` may still be applied.
    pub fn is_current(&self, token: u64) -> bool {
        self.token == token
    }
}

/// How the current config wants its preview rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPlan {
    /// Reference the URL as an image and offer the Markdown embed string.
    Image { url: String, markdown: String },
    /// Fetch the URL once and pretty-print the document.
    Document { url: String },
}

pub fn plan_preview(config: &CardConfig, export_url: &str) -> PreviewPlan {
    match config.format {
        CardFormat::Svg => PreviewPlan::Image {
            url: export_url.to_string(),
            markdown: markdown_embed(export_url),
        },
        CardFormat::Json => PreviewPlan::Document {
            url: export_url.to_string(),
        },
    }
}

pub fn markdown_embed(url: &str) -> String {
    format!("![card]({url})")
}

/// One asynchronous read of a JSON preview. Success is the pretty-printed
/// document; both failure kinds collapse to `PreviewError` and the caller
/// shows `PREVIEW_FAILURE_MESSAGE`.
pub async fn fetch_document(url: &str) -> Result<String, PreviewError> {
    let response = reqwest::get(url).await.map_err(|err| {
        #[cfg(debug_assertions)]
        eprintln!("[preview] request failed: {err}");
        #[cfg(not(debug_assertions))]
        let _ = err;
        PreviewError::Network
    })?;
    let body = response.text().await.map_err(|_| PreviewError::Network)?;
    pretty_document(&body)
}

/// Re-indent a JSON body for humans. Key order is whatever the service
/// sent; only readable indentation is required.
pub fn pretty_document(body: &str) -> Result<String, PreviewError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| PreviewError::Malformed)?;
    serde_json::to_string_pretty(&value).map_err(|_| PreviewError::Malformed)
}
