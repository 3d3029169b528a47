//! IPC between Rust and the map page.
//!
//! - **JS -> Rust**: the page calls `window.ipc.postMessage(JSON.stringify({type, ...}))`,
//!   which triggers the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: Rust evaluates scripts produced by the bridge, wrapped so
//!   the result callback reports `{ok}` or `{error}`.

/// JavaScript snippet injected into every map webview before the page runs.
///
/// Exposes `window.mapview.postMessage(obj)` and `window.mapview.emit(type, fields)`
/// for scripts evaluated through `evaluateJavaScript`.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.mapview = window.mapview || {};
    window.mapview.postMessage = function(msg) {
        window.ipc.postMessage(JSON.stringify(msg));
    };
    window.mapview.emit = function(type, fields) {
        var msg = Object.assign({}, fields || {});
        msg.type = type;
        window.mapview.postMessage(msg);
    };
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_script_posts_json_through_wry_ipc() {
        assert!(IPC_INIT_SCRIPT.contains("window.ipc.postMessage(JSON.stringify(msg))"));
        assert!(IPC_INIT_SCRIPT.contains("window.mapview.emit"));
    }
}
