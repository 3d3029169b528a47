use super::*;
use crate::schema::MapViewConfig;

fn errors_of(config: &MapViewConfig) -> String {
    match validate(config) {
        Err(ConfigError::ValidationError(msg)) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn default_config_is_valid() {
    assert!(validate(&MapViewConfig::default()).is_ok());
}

#[test]
fn latitude_out_of_range() {
    let mut config = MapViewConfig::default();
    config.map.lat = 91.0;
    assert!(errors_of(&config).contains("map.lat"));
}

#[test]
fn longitude_nan_rejected() {
    let mut config = MapViewConfig::default();
    config.map.lng = f64::NAN;
    assert!(errors_of(&config).contains("map.lng"));
}

#[test]
fn zoom_bounds_checked() {
    let mut config = MapViewConfig::default();
    config.map.zoom = 23.0;
    config.map.min_zoom = Some(-1.0);
    let msg = errors_of(&config);
    assert!(msg.contains("map.zoom"));
    assert!(msg.contains("map.min_zoom"));
}

#[test]
fn min_zoom_above_max_zoom() {
    let mut config = MapViewConfig::default();
    config.map.min_zoom = Some(15.0);
    config.map.max_zoom = Some(10.0);
    assert!(errors_of(&config).contains("greater than map.max_zoom"));
}

#[test]
fn style_must_be_json_array() {
    let mut config = MapViewConfig::default();
    config.map.style = r#"{"featureType":"water"}"#.into();
    assert!(errors_of(&config).contains("JSON array"));

    config.map.style = "not json".into();
    assert!(errors_of(&config).contains("not valid JSON"));

    config.map.style = r##"[{"featureType":"water","stylers":[{"color":"#000000"}]}]"##.into();
    assert!(validate(&config).is_ok());
}

#[test]
fn bridge_ready_events_required() {
    let mut config = MapViewConfig::default();
    config.bridge.ready_events.clear();
    config.bridge.pending_warn_threshold = 0;
    let msg = errors_of(&config);
    assert!(msg.contains("bridge.ready_events"));
    assert!(msg.contains("pending_warn_threshold"));
}

#[test]
fn window_size_checked() {
    let mut config = MapViewConfig::default();
    config.webview.width = 10;
    assert!(errors_of(&config).contains("webview.width"));
}

#[test]
fn multiple_errors_joined() {
    let mut config = MapViewConfig::default();
    config.map.lat = 100.0;
    config.webview.height = 0;
    let msg = errors_of(&config);
    assert!(msg.contains("; "));
}

#[test]
fn repair_leaves_valid_config_alone() {
    let mut config = MapViewConfig::default();
    config.map.lat = 45.0;
    assert!(repair(&mut config).is_empty());
    assert!((config.map.lat - 45.0).abs() < f64::EPSILON);
}

#[test]
fn repair_resets_only_offending_settings() {
    let mut config = MapViewConfig::default();
    config.map.api_key = "key".into();
    config.map.zoom = 99.0;
    config.map.style = "not json".into();
    config.bridge.ready_events = vec!["booted".into(), " ".into()];
    config.bridge.pending_warn_threshold = 0;
    config.webview.height = 50_000;

    let resets = repair(&mut config);
    assert_eq!(resets.len(), 5);
    assert_eq!(config.map.api_key, "key");
    assert!((config.map.zoom - 14.0).abs() < f64::EPSILON);
    assert_eq!(config.map.style, "[]");
    assert_eq!(config.bridge.ready_events, vec!["booted"]);
    assert_eq!(config.bridge.pending_warn_threshold, 256);
    assert_eq!(config.webview.height, 768);
    assert!(validate(&config).is_ok());
}

#[test]
fn repair_map_options_falls_back_to_given_values() {
    let mut fallback = crate::schema::MapOptions::default();
    fallback.lng = -70.0;
    let mut options = fallback.clone();
    options.lng = 181.0;
    options.min_zoom = Some(-1.0);

    let resets = repair_map_options(&mut options, &fallback);
    assert_eq!(resets.len(), 2);
    assert!((options.lng + 70.0).abs() < f64::EPSILON);
    assert_eq!(options.min_zoom, None);
}
