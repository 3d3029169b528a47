use std::sync::{Arc, Mutex};

use mapview_bridge::script::parse_wrapped_result;
use mapview_bridge::{ScriptCallback, ScriptEvaluator, ScriptOutcome};
use mapview_common::{BridgeError, ViewId};
use wry::WebView;

/// Handle to a map webview.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) view_id: ViewId,
}

impl WebViewHandle {
    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }
}

impl ScriptEvaluator for WebViewHandle {
    fn evaluate(&self, script: &str, callback: ScriptCallback) {
        let slot = Arc::new(OnceCallback::new(callback));
        let on_result = Arc::clone(&slot);

        let started = self
            .webview
            .evaluate_script_with_callback(script, move |raw| {
                on_result.fire(parse_wrapped_result(&raw));
            });

        if let Err(e) = started {
            tracing::warn!(view_id = %self.view_id, error = %e, "Script evaluation failed to start");
            slot.fire(Err(BridgeError::Dispatch(e.to_string())));
        }
    }
}

/// A [`ScriptCallback`] that runs at most once, shareable with `Fn` closures.
struct OnceCallback(Mutex<Option<ScriptCallback>>);

impl OnceCallback {
    fn new(callback: ScriptCallback) -> Self {
        Self(Mutex::new(Some(callback)))
    }

    /// Returns `false` if the callback already ran.
    fn fire(&self, outcome: ScriptOutcome) -> bool {
        let callback = match self.0.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match callback {
            Some(callback) => {
                callback(outcome);
                true
            }
            None => false,
        }
    }
}
