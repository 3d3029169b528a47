//! Host-facing method calls, the commands they become and the responses
//! sent back.

mod map;
mod types;


pub use map::{
    CameraUpdate, CircleSpec, GroundOverlaySpec, HeatmapSpec, MapCommand, MarkerSpec,
    PolygonSpec, PolylineSpec, METHODS,
};
pub use types::{
    GestureHandling, GroundOverlayOptions, HeatmapOptions, LatLng, LatLngBounds, MarkerOptions,
    PolylineOptions, ScreenPoint, ShapeOptions, WeightedLatLng,
};

use mapview_common::{new_correlation_id, BridgeError};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use crate::script::ScriptOutcome;

/// One `{method, payload}` request arriving on a view's method channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub payload: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, payload: Value) -> Self {
        Self {
            method: method.into(),
            payload,
        }
    }

    /// Parse a raw JSON request.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw)
            .map_err(|e| BridgeError::InvalidArgs(format!("malformed method call: {e}")))
    }
}

/// A validated operation ready to be dispatched to the embedded page.
///
/// Once dispatched the command is gone; nothing keeps it for replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    id: String,
    method: String,
    script: String,
}

impl Command {
    /// Decode a method call into a command, rendering its script.
    pub fn from_call(call: &MethodCall) -> Result<Self, BridgeError> {
        let map = MapCommand::parse(&call.method, &call.payload)?;
        Ok(Self::from_map(&map))
    }

    pub fn from_map(command: &MapCommand) -> Self {
        Self::with_script(command.method(), command.to_script())
    }

    /// Raw script command, equivalent to `evaluateJavaScript`.
    pub fn evaluate(script: impl Into<String>) -> Self {
        Self::with_script("evaluateJavaScript", script.into())
    }

    fn with_script(method: &str, script: String) -> Self {
        Self {
            id: new_correlation_id(),
            method: method.to_string(),
            script,
        }
    }

    /// Correlation id, only meaningful in logs.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn script(&self) -> &str {
        &self.script
    }
}

/// Reply to a [`MethodCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Value(Value),
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodResponse {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn from_error(err: &BridgeError) -> Self {
        match err {
            BridgeError::NotImplemented(_) => Self::NotImplemented,
            other => Self::Error {
                code: other.code().to_string(),
                message: other.to_string(),
            },
        }
    }

    pub fn from_outcome(outcome: ScriptOutcome) -> Self {
        match outcome {
            Ok(value) => Self::Value(value),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Wire form: `{value}`, `{errorCode, errorMessage}` or
    /// `{notImplemented: true}`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Value(value) => json!({ "value": value }),
            Self::Error { code, message } => json!({
                "errorCode": code,
                "errorMessage": message,
            }),
            Self::NotImplemented => json!({ "notImplemented": true }),
        }
    }
}

impl Serialize for MethodResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
