//! Initial map page options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation;

/// Base map type understood by the embedded map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    #[default]
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

impl MapType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Roadmap => "roadmap",
            Self::Satellite => "satellite",
            Self::Hybrid => "hybrid",
            Self::Terrain => "terrain",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "roadmap" => Some(Self::Roadmap),
            "satellite" => Some(Self::Satellite),
            "hybrid" => Some(Self::Hybrid),
            "terrain" => Some(Self::Terrain),
            _ => None,
        }
    }
}

/// Options baked into the map page when it is generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapOptions {
    /// Google Maps JavaScript API key.
    pub api_key: String,
    pub lat: f64,
    pub lng: f64,
    /// Initial zoom level (valid range: 0-22).
    pub zoom: f64,
    /// Map style as a JSON array string.
    pub style: String,
    pub map_type: MapType,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub zoom_control: bool,
    pub traffic_enabled: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            lat: 0.0,
            lng: 0.0,
            zoom: 14.0,
            style: "[]".into(),
            map_type: MapType::Roadmap,
            min_zoom: None,
            max_zoom: None,
            zoom_control: true,
            traffic_enabled: false,
        }
    }
}

impl MapOptions {
    /// Overlay host creation arguments (`apiKey`, `lat`, `mapType`, ...) onto
    /// `self`. Missing, mistyped or out-of-range entries keep the current
    /// value.
    pub fn with_creation_args(mut self, args: &Value) -> Self {
        let Some(args) = args.as_object() else {
            return self;
        };
        let base = self.clone();

        if let Some(v) = args.get("apiKey").and_then(Value::as_str) {
            self.api_key = v.to_string();
        }
        if let Some(v) = args.get("lat").and_then(Value::as_f64) {
            self.lat = v;
        }
        if let Some(v) = args.get("lng").and_then(Value::as_f64) {
            self.lng = v;
        }
        if let Some(v) = args.get("zoom").and_then(Value::as_f64) {
            self.zoom = v;
        }
        if let Some(v) = args.get("style").and_then(Value::as_str) {
            self.style = v.to_string();
        }
        if let Some(v) = args
            .get("mapType")
            .and_then(Value::as_str)
            .and_then(MapType::parse)
        {
            self.map_type = v;
        }
        if let Some(v) = args.get("minZoom").and_then(Value::as_f64) {
            self.min_zoom = Some(v);
        }
        if let Some(v) = args.get("maxZoom").and_then(Value::as_f64) {
            self.max_zoom = Some(v);
        }
        if let Some(v) = args.get("zoomControl").and_then(Value::as_bool) {
            self.zoom_control = v;
        }
        if let Some(v) = args.get("trafficEnabled").and_then(Value::as_bool) {
            self.traffic_enabled = v;
        }

        for reset in validation::repair_map_options(&mut self, &base) {
            tracing::warn!("ignoring creation argument: {reset}");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_options_defaults() {
        let opts = MapOptions::default();
        assert!(opts.api_key.is_empty());
        assert!((opts.zoom - 14.0).abs() < f64::EPSILON);
        assert_eq!(opts.style, "[]");
        assert_eq!(opts.map_type, MapType::Roadmap);
        assert!(opts.min_zoom.is_none());
        assert!(opts.zoom_control);
        assert!(!opts.traffic_enabled);
    }

    #[test]
    fn map_type_serialization() {
        let json = serde_json::to_string(&MapType::Satellite).unwrap();
        assert_eq!(json, "\"satellite\"");
        let parsed: MapType = serde_json::from_str("\"terrain\"").unwrap();
        assert_eq!(parsed, MapType::Terrain);
    }

    #[test]
    fn map_type_parse_rejects_unknown() {
        assert_eq!(MapType::parse("hybrid"), Some(MapType::Hybrid));
        assert_eq!(MapType::parse("Hybrid"), None);
        assert_eq!(MapType::parse("moon"), None);
    }

    #[test]
    fn creation_args_override_fields() {
        let args = json!({
            "apiKey": "abc",
            "lat": 48.85,
            "lng": 2.35,
            "zoom": 11,
            "mapType": "satellite",
            "maxZoom": 18.0,
            "trafficEnabled": true
        });
        let opts = MapOptions::default().with_creation_args(&args);
        assert_eq!(opts.api_key, "abc");
        assert!((opts.lat - 48.85).abs() < f64::EPSILON);
        assert!((opts.zoom - 11.0).abs() < f64::EPSILON);
        assert_eq!(opts.map_type, MapType::Satellite);
        assert_eq!(opts.max_zoom, Some(18.0));
        assert!(opts.traffic_enabled);
        // Untouched
        assert!(opts.zoom_control);
        assert!(opts.min_zoom.is_none());
    }

    #[test]
    fn creation_args_ignore_mistyped_values() {
        let args = json!({"lat": "north", "zoomControl": "yes", "mapType": "moon"});
        let opts = MapOptions::default().with_creation_args(&args);
        assert_eq!(opts, MapOptions::default());
    }

    #[test]
    fn creation_args_out_of_range_keep_base_values() {
        let mut base = MapOptions::default();
        base.lat = 10.0;
        base.max_zoom = Some(18.0);
        let args = json!({
            "lat": 500.0,
            "lng": 30.0,
            "zoom": -40,
            "minZoom": 20.0,
            "maxZoom": 1.0,
            "style": "{}"
        });
        let opts = base.clone().with_creation_args(&args);
        assert!((opts.lat - 10.0).abs() < f64::EPSILON);
        assert!((opts.lng - 30.0).abs() < f64::EPSILON);
        assert!((opts.zoom - 14.0).abs() < f64::EPSILON);
        assert_eq!(opts.min_zoom, None);
        assert_eq!(opts.max_zoom, Some(18.0));
        assert_eq!(opts.style, "[]");
    }

    #[test]
    fn creation_args_non_object_is_noop() {
        let opts = MapOptions::default().with_creation_args(&json!(null));
        assert_eq!(opts, MapOptions::default());
    }
}
