use mapview_config::WebViewSettings;

/// Configuration for creating a map webview.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Page document to render.
    pub html: String,
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self::from_settings(&WebViewSettings::default(), String::new())
    }
}

impl WebViewConfig {
    /// Build from the `[webview]` config section and a rendered page.
    pub fn from_settings(settings: &WebViewSettings, html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            transparent: settings.transparent,
            devtools: settings.devtools || cfg!(debug_assertions),
            user_agent: settings.user_agent.clone(),
        }
    }
}
