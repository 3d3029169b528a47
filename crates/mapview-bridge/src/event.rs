//! Messages posted by the embedded page.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Known event types emitted by the map page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    MapReady,
    CameraMoveStarted,
    CameraMove,
    CameraIdle,
    Tap,
    LongPress,
    PoiTap,
    MarkerTap,
    MarkerDragStart,
    MarkerDrag,
    MarkerDragEnd,
    PolylineTap,
    PolygonTap,
    CircleTap,
    GroundOverlayTap,
    JsError,
    AuthFailure,
    /// Anything else; forwarded unchanged.
    Other(String),
}

impl EventKind {
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "mapReady" => Self::MapReady,
            "cameraMoveStarted" => Self::CameraMoveStarted,
            "cameraMove" => Self::CameraMove,
            "cameraIdle" => Self::CameraIdle,
            "tap" => Self::Tap,
            "longPress" => Self::LongPress,
            "poiTap" => Self::PoiTap,
            "markerTap" => Self::MarkerTap,
            "markerDragStart" => Self::MarkerDragStart,
            "markerDrag" => Self::MarkerDrag,
            "markerDragEnd" => Self::MarkerDragEnd,
            "polylineTap" => Self::PolylineTap,
            "polygonTap" => Self::PolygonTap,
            "circleTap" => Self::CircleTap,
            "groundOverlayTap" => Self::GroundOverlayTap,
            "jsError" => Self::JsError,
            "authFailure" => Self::AuthFailure,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A `{type, ...fields}` object from the page.
///
/// The body is kept exactly as received so it reaches the host unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeEvent {
    body: Map<String, Value>,
}

impl BridgeEvent {
    /// Parse a raw IPC payload.
    ///
    /// Returns `None` unless the payload is a JSON object with a string
    /// `type` field.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(Self::from_value)
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(body) if body.get("type").is_some_and(Value::is_string) => {
                Some(Self { body })
            }
            _ => None,
        }
    }

    pub fn event_type(&self) -> &str {
        self.body
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn kind(&self) -> EventKind {
        EventKind::from_type(self.event_type())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.body.get(field).and_then(Value::as_f64)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

impl Serialize for BridgeEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}
