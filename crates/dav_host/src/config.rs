//! Session configuration.

use serde::{Deserialize, Serialize};

/// Default document-title suffix.
pub const DEFAULT_TITLE_SUFFIX: &str = "WebDAV";
/// Default lifetime of success toasts, in seconds.
pub const DEFAULT_TOAST_HIDE_SECS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Per-session settings read once at startup.
pub struct SessionConfig {
    /// Appended to the decoded path in the document title.
    pub title_suffix: String,
    /// Lifetime of success toasts, in seconds.
    pub toast_hide_secs: u32,
    /// Page origin (`scheme://host[:port]`) stripped from absolute destination URLs.
    pub origin: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            toast_hide_secs: DEFAULT_TOAST_HIDE_SECS,
            origin: String::new(),
        }
    }
}

impl SessionConfig {
    /// Parses a JSON config, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not valid JSON for this shape.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }

    /// Document title shown for `decoded_path`.
    pub fn title_for(&self, decoded_path: &str) -> String {
        format!("{decoded_path} | {}", self.title_suffix)
    }
}
