use std::collections::HashMap;

use mapview_bridge::{
    Command, HostSink, MapView, MethodCall, MethodResponse, ProbeOutcome, ResultHandle, Submission,
};
use mapview_common::{BridgeError, MapViewError, ViewId};
use mapview_config::MapViewConfig;
use serde_json::Value;
use tracing::{debug, warn};
use wry::raw_window_handle;

use crate::events::WebViewEvent;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

struct ManagedView {
    handle: WebViewHandle,
    view: MapView,
}

/// Maps view ids to their webview and bridge.
pub struct MapViewRegistry {
    manager: WebViewManager,
    config: MapViewConfig,
    views: HashMap<ViewId, ManagedView>,
}

impl MapViewRegistry {
    pub fn new(manager: WebViewManager, config: MapViewConfig) -> Self {
        Self {
            manager,
            config,
            views: HashMap::new(),
        }
    }

    /// Create a map view and its webview.
    ///
    /// `creation_args` overlay `[map]` from the config, keyed as the host
    /// sends them (`apiKey`, `lat`, `lng`, ...).
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        view_id: ViewId,
        window: &W,
        bounds: wry::Rect,
        creation_args: Option<&Value>,
    ) -> Result<(), MapViewError> {
        if self.views.contains_key(&view_id) {
            warn!(view_id = %view_id, "Replacing existing map view");
            self.destroy(view_id);
        }

        let view = MapView::new(view_id, &self.config, creation_args);
        let webview_config = WebViewConfig::from_settings(&self.config.webview, view.page_html());
        let handle = self
            .manager
            .create(view_id, window, bounds, webview_config)
            .map_err(|e| MapViewError::WebView(e.to_string()))?;

        debug!(view_id = %view_id, channel = %view_id.channel_name(), "Map view registered");
        self.views.insert(view_id, ManagedView { handle, view });
        Ok(())
    }

    pub fn view(&self, view_id: ViewId) -> Option<&MapView> {
        self.views.get(&view_id).map(|m| &m.view)
    }

    pub fn handle(&self, view_id: ViewId) -> Option<&WebViewHandle> {
        self.views.get(&view_id).map(|m| &m.handle)
    }

    /// Route a host method call to a view. Unknown views are answered with
    /// an error.
    pub fn call(&mut self, view_id: ViewId, call: &MethodCall, result: ResultHandle) {
        match self.views.get_mut(&view_id) {
            Some(ManagedView { handle, view }) => view.handle_method_call(&*handle, call, result),
            None => result(MethodResponse::from_error(&BridgeError::ViewNotFound(
                view_id.as_u32(),
            ))),
        }
    }

    /// Submit a prepared command, observing its result.
    pub fn submit(
        &mut self,
        view_id: ViewId,
        command: Command,
        result: ResultHandle,
    ) -> Result<Submission, BridgeError> {
        let ManagedView { handle, view } = self
            .views
            .get_mut(&view_id)
            .ok_or(BridgeError::ViewNotFound(view_id.as_u32()))?;
        Ok(view.submit(&*handle, command, result))
    }

    /// Submit a prepared command without observing its result.
    pub fn execute(&mut self, view_id: ViewId, command: Command) -> Result<Submission, BridgeError> {
        let ManagedView { handle, view } = self
            .views
            .get_mut(&view_id)
            .ok_or(BridgeError::ViewNotFound(view_id.as_u32()))?;
        Ok(view.execute(&*handle, command))
    }

    /// Apply webview events and deferred probe results. Call once per UI
    /// loop iteration. Returns the number of webview events handled.
    pub fn pump(&mut self, sink: &dyn HostSink) -> usize {
        let events = self.manager.drain_events();
        let handled = events.len();

        for event in events {
            let view_id = event.view_id();
            let Some(ManagedView { handle, view }) = self.views.get_mut(&view_id) else {
                debug!(view_id = %view_id, ?event, "Event for unknown view");
                continue;
            };
            match event {
                WebViewEvent::PageLoad { state, .. } => view.on_page_load(&*handle, state.into()),
                WebViewEvent::IpcMessage { body, .. } => {
                    view.on_message(&*handle, sink, &body);
                }
                WebViewEvent::NavigationBlocked { .. } | WebViewEvent::Closed { .. } => {}
            }
        }

        for (view_id, managed) in &mut self.views {
            for outcome in managed.view.pump() {
                if outcome == ProbeOutcome::LoaderMissing {
                    debug!(view_id = %view_id, "View will keep queuing commands");
                }
            }
        }
        handled
    }

    pub fn set_bounds(&self, view_id: ViewId, bounds: wry::Rect) -> Result<(), MapViewError> {
        let managed = self
            .views
            .get(&view_id)
            .ok_or(BridgeError::ViewNotFound(view_id.as_u32()))?;
        managed
            .handle
            .set_bounds(bounds)
            .map_err(|e| MapViewError::WebView(e.to_string()))
    }

    /// Destroy a view by id.
    ///
    /// Events the webview produced but `pump` has not delivered are
    /// discarded so they cannot reach a later view with the same id.
    pub fn destroy(&mut self, view_id: ViewId) -> bool {
        match self.views.remove(&view_id) {
            Some(managed) => {
                drop(managed.handle);
                let discarded = self.manager.discard_events(view_id);
                debug!(
                    view_id = %view_id,
                    pending = managed.view.pending_len(),
                    discarded,
                    "Map view destroyed"
                );
                self.manager.push_event(WebViewEvent::Closed { view_id });
                true
            }
            None => false,
        }
    }

    pub fn active_views(&self) -> Vec<ViewId> {
        self.views.keys().copied().collect()
    }

    /// Destroy all views. Used during graceful shutdown.
    pub fn destroy_all(&mut self) {
        for view_id in self.active_views() {
            self.destroy(view_id);
        }
    }

    pub fn count(&self) -> usize {
        self.views.len()
    }
}
