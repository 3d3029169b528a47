use crate::schema::MapViewConfig;

use super::helpers::{style_error, validate_range, validate_range_f64};

/// Highest zoom level served by the map tiles.
pub(crate) const MAX_ZOOM_LEVEL: f64 = 22.0;

pub(crate) fn validate_map(errors: &mut Vec<String>, config: &MapViewConfig) {
    let map = &config.map;
    validate_range_f64(errors, "map.lat", map.lat, -90.0, 90.0);
    validate_range_f64(errors, "map.lng", map.lng, -180.0, 180.0);
    validate_range_f64(errors, "map.zoom", map.zoom, 0.0, MAX_ZOOM_LEVEL);

    if let Some(min) = map.min_zoom {
        validate_range_f64(errors, "map.min_zoom", min, 0.0, MAX_ZOOM_LEVEL);
    }
    if let Some(max) = map.max_zoom {
        validate_range_f64(errors, "map.max_zoom", max, 0.0, MAX_ZOOM_LEVEL);
    }
    if let (Some(min), Some(max)) = (map.min_zoom, map.max_zoom) {
        if min > max {
            errors.push(format!("map.min_zoom = {min} is greater than map.max_zoom = {max}"));
        }
    }

    errors.extend(style_error(&map.style));
}

pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &MapViewConfig) {
    let bridge = &config.bridge;
    if bridge.ready_events.is_empty() {
        errors.push("bridge.ready_events must name at least one event type".into());
    }
    if bridge.ready_events.iter().any(|e| e.trim().is_empty()) {
        errors.push("bridge.ready_events contains an empty event type".into());
    }
    if bridge.pending_warn_threshold == 0 {
        errors.push("bridge.pending_warn_threshold must be at least 1".into());
    }
}

pub(crate) fn validate_webview(errors: &mut Vec<String>, config: &MapViewConfig) {
    validate_range(errors, "webview.width", config.webview.width, 100, 16384);
    validate_range(errors, "webview.height", config.webview.height, 100, 16384);
}
