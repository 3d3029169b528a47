//! WebView adapter hosting map pages.
//!
//! Wraps the `wry` crate to provide:
//! - A map webview per [`ViewId`](mapview_common::ViewId)
//! - Script evaluation with result callbacks for the bridge
//! - IPC from the page into the bridge
//! - Navigation restricted to the map page and Google Maps origins

pub mod events;
pub mod ipc;
pub mod manager;

pub use events::{PageLoadState, WebViewEvent};
pub use manager::{MapViewRegistry, WebViewConfig, WebViewHandle, WebViewManager};
