use std::sync::{Arc, Mutex};

use mapview_common::ViewId;
use tracing::{debug, trace, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for map webview navigation.
///
/// - `about:blank` / `data:text/html`: the inline map page, depending on
///   platform
/// - Google Maps API, tile, static asset and font origins
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "about:blank",
    "data:text/html",
    "https://maps.googleapis.com/",
    "https://maps.gstatic.com/",
    "https://fonts.googleapis.com/",
    "https://fonts.gstatic.com/",
];

/// Check whether a URL is allowed by the navigation allowlist.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: ViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            trace!(view_id = %view_id, body_len = body.len(), "IPC message from page");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::IpcMessage { view_id, body });
            }
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: ViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(view_id = %view_id, ?state, url = %url, "Page load");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::PageLoad {
                    view_id,
                    state,
                    url,
                });
            }
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: ViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if is_navigation_allowed(&url) {
                return true;
            }
            warn!(view_id = %view_id, url = %url, "Navigation blocked: URL not in allowlist");
            if let Ok(mut evts) = events.lock() {
                evts.push(WebViewEvent::NavigationBlocked { view_id, url });
            }
            false
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_inline_page() {
        assert!(is_navigation_allowed("about:blank"));
        assert!(is_navigation_allowed("data:text/html,<html></html>"));
    }

    #[test]
    fn allows_google_maps_origins() {
        assert!(is_navigation_allowed(
            "https://maps.googleapis.com/maps/api/js?key=k&callback=initMap"
        ));
        assert!(is_navigation_allowed(
            "https://maps.gstatic.com/mapfiles/api-3/images/spotlight-poi3.png"
        ));
        assert!(is_navigation_allowed("https://fonts.gstatic.com/s/roboto/v18/a.woff2"));
    }

    #[test]
    fn blocks_arbitrary_https() {
        assert!(!is_navigation_allowed("https://evil.com"));
        assert!(!is_navigation_allowed("https://maps.googleapis.com.evil.com/"));
        assert!(!is_navigation_allowed("https://google.com"));
    }

    #[test]
    fn blocks_file_and_script_schemes() {
        assert!(!is_navigation_allowed("file:///etc/passwd"));
        assert!(!is_navigation_allowed("javascript:alert(1)"));
        assert!(!is_navigation_allowed("data:image/svg+xml,<svg/>"));
    }

    #[test]
    fn blocks_plain_http() {
        assert!(!is_navigation_allowed("http://maps.googleapis.com/maps/api/js"));
        assert!(!is_navigation_allowed("http://localhost:8080"));
    }

    #[test]
    fn blocks_empty_and_garbage() {
        assert!(!is_navigation_allowed(""));
        assert!(!is_navigation_allowed("   "));
        assert!(!is_navigation_allowed("not-a-url"));
    }
}
