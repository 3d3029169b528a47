//! WebView event types.

use mapview_bridge::PageLoad;
use mapview_common::ViewId;
use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

impl From<PageLoadState> for PageLoad {
    fn from(state: PageLoadState) -> Self {
        match state {
            PageLoadState::Started => PageLoad::Started,
            PageLoadState::Finished => PageLoad::Finished,
        }
    }
}

/// Events emitted by a map webview.
///
/// Webview callbacks only push these into the manager's sink; the UI loop
/// drains and applies them.
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad {
        view_id: ViewId,
        state: PageLoadState,
        url: String,
    },
    /// Raw message posted by the page through `window.ipc`.
    IpcMessage { view_id: ViewId, body: String },
    /// A navigation outside the allowlist was refused.
    NavigationBlocked { view_id: ViewId, url: String },
    /// WebView was destroyed.
    Closed { view_id: ViewId },
}

impl WebViewEvent {
    pub fn view_id(&self) -> ViewId {
        match self {
            Self::PageLoad { view_id, .. }
            | Self::IpcMessage { view_id, .. }
            | Self::NavigationBlocked { view_id, .. }
            | Self::Closed { view_id } => *view_id,
        }
    }
}
