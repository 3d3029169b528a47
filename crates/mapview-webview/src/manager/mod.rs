//! WebView lifecycle management.
//!
//! `WebViewManager` creates `wry::WebView` instances for map views and owns
//! the event sink their callbacks write into. `MapViewRegistry` pairs each
//! webview with its bridge-side [`MapView`](mapview_bridge::MapView).

use std::sync::{Arc, Mutex};

use mapview_common::ViewId;

use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use registry::MapViewRegistry;
pub use types::WebViewConfig;

/// Creates map webviews and collects their events.
pub struct WebViewManager {
    /// Event sink; events are pushed here for the main event loop to consume.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Drop undrained events from `view_id`. Returns how many were dropped.
    pub(crate) fn discard_events(&self, view_id: ViewId) -> usize {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = events.len();
        events.retain(|e| e.view_id() != view_id);
        before - events.len()
    }

    pub(crate) fn push_event(&self, event: WebViewEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}
