//! Host window and webview settings.

use serde::{Deserialize, Serialize};

/// Settings for the window and webview hosting a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSettings {
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    pub transparent: bool,
    pub user_agent: Option<String>,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            title: "mapview".into(),
            width: 1024,
            height: 768,
            devtools: cfg!(debug_assertions),
            transparent: false,
            user_agent: Some("mapview/0.1".into()),
        }
    }
}
