//! Reset settings that fail validation instead of rejecting the whole
//! config.

use crate::schema::{BridgeConfig, MapOptions, MapViewConfig, WebViewSettings};

use super::helpers::{range_error, range_error_f64, style_error};
use super::sections::MAX_ZOOM_LEVEL;

/// Reset every invalid field of `options` to the matching field of
/// `fallback`. Returns one message per reset field.
pub fn repair_map_options(options: &mut MapOptions, fallback: &MapOptions) -> Vec<String> {
    let mut resets = Vec::new();

    if let Some(e) = range_error_f64("map.lat", options.lat, -90.0, 90.0) {
        resets.push(e);
        options.lat = fallback.lat;
    }
    if let Some(e) = range_error_f64("map.lng", options.lng, -180.0, 180.0) {
        resets.push(e);
        options.lng = fallback.lng;
    }
    if let Some(e) = range_error_f64("map.zoom", options.zoom, 0.0, MAX_ZOOM_LEVEL) {
        resets.push(e);
        options.zoom = fallback.zoom;
    }
    if let Some(e) = options
        .min_zoom
        .and_then(|z| range_error_f64("map.min_zoom", z, 0.0, MAX_ZOOM_LEVEL))
    {
        resets.push(e);
        options.min_zoom = fallback.min_zoom;
    }
    if let Some(e) = options
        .max_zoom
        .and_then(|z| range_error_f64("map.max_zoom", z, 0.0, MAX_ZOOM_LEVEL))
    {
        resets.push(e);
        options.max_zoom = fallback.max_zoom;
    }
    if zoom_bounds_inverted(options) {
        resets.push(format!(
            "map.min_zoom = {:?} is greater than map.max_zoom = {:?}",
            options.min_zoom, options.max_zoom
        ));
        options.min_zoom = fallback.min_zoom;
        options.max_zoom = fallback.max_zoom;
        if zoom_bounds_inverted(options) {
            options.min_zoom = None;
            options.max_zoom = None;
        }
    }
    if let Some(e) = style_error(&options.style) {
        resets.push(e);
        options.style = fallback.style.clone();
    }
    resets
}

/// Reset every invalid setting in `config` to its default.
pub fn repair(config: &mut MapViewConfig) -> Vec<String> {
    let mut resets = repair_map_options(&mut config.map, &MapOptions::default());
    repair_bridge(&mut resets, &mut config.bridge);
    repair_webview(&mut resets, &mut config.webview);
    resets
}

fn zoom_bounds_inverted(options: &MapOptions) -> bool {
    matches!((options.min_zoom, options.max_zoom), (Some(min), Some(max)) if min > max)
}

fn repair_bridge(resets: &mut Vec<String>, bridge: &mut BridgeConfig) {
    let before = bridge.ready_events.len();
    bridge.ready_events.retain(|e| !e.trim().is_empty());
    if bridge.ready_events.len() != before {
        resets.push("bridge.ready_events contains an empty event type".into());
    }
    if bridge.ready_events.is_empty() {
        resets.push("bridge.ready_events must name at least one event type".into());
        bridge.ready_events = BridgeConfig::default().ready_events;
    }
    if bridge.pending_warn_threshold == 0 {
        resets.push("bridge.pending_warn_threshold must be at least 1".into());
        bridge.pending_warn_threshold = BridgeConfig::default().pending_warn_threshold;
    }
}

fn repair_webview(resets: &mut Vec<String>, webview: &mut WebViewSettings) {
    let defaults = WebViewSettings::default();
    if let Some(e) = range_error("webview.width", webview.width, 100, 16384) {
        resets.push(e);
        webview.width = defaults.width;
    }
    if let Some(e) = range_error("webview.height", webview.height, 100, 16384) {
        resets.push(e);
        webview.height = defaults.height;
    }
}
