//! Typed map operations and their rendering into page script calls.
//!
//! The page defines one global function per operation (`addMarker`,
//! `moveCamera`, ...). A [`MapCommand`] decodes a `{method, payload}` call,
//! validates it and renders the matching call expression.

use mapview_common::BridgeError;
use mapview_config::MapType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{
    GestureHandling, GroundOverlayOptions, HeatmapOptions, LatLng, LatLngBounds, MarkerOptions,
    PolylineOptions, ScreenPoint, ShapeOptions, WeightedLatLng,
};

/// Method names accepted on the map channel.
pub const METHODS: &[&str] = &[
    "evaluateJavaScript",
    "addMarker",
    "removeMarker",
    "showInfoWindow",
    "hideInfoWindow",
    "isInfoWindowShown",
    "addPolyline",
    "removePolyline",
    "addPolygon",
    "removePolygon",
    "addCircle",
    "removeCircle",
    "addHeatmap",
    "removeHeatmap",
    "addGroundOverlay",
    "removeGroundOverlay",
    "setMapStyle",
    "setMapType",
    "setZoomControl",
    "setMinMaxZoom",
    "setTrafficEnabled",
    "setRestriction",
    "setGestureHandling",
    "moveCamera",
    "fitBounds",
    "panBy",
    "zoomBy",
    "zoomTo",
    "getVisibleRegion",
    "latLngToScreenCoordinate",
    "screenCoordinateToLatLng",
    "getZoomLevel",
];

// =============================================================================
// PAYLOADS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub marker_id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub options: MarkerOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineSpec {
    pub polyline_id: String,
    pub points: Vec<LatLng>,
    #[serde(default)]
    pub options: PolylineOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonSpec {
    pub polygon_id: String,
    /// Outer ring first, then holes.
    pub paths: Vec<Vec<LatLng>>,
    #[serde(default)]
    pub options: ShapeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleSpec {
    pub circle_id: String,
    pub center: LatLng,
    /// Radius in meters.
    pub radius: f64,
    #[serde(default)]
    pub options: ShapeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapSpec {
    pub heatmap_id: String,
    pub data: Vec<WeightedLatLng>,
    #[serde(default)]
    pub options: HeatmapOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundOverlaySpec {
    pub ground_overlay_id: String,
    pub image_url: String,
    pub bounds: LatLngBounds,
    #[serde(default)]
    pub options: GroundOverlayOptions,
}

/// Camera change; unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraUpdate {
    pub target: Option<LatLng>,
    pub zoom: Option<f64>,
    pub heading: Option<f64>,
    pub tilt: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MinMaxZoomPayload {
    #[serde(default)]
    min_zoom: Option<f64>,
    #[serde(default)]
    max_zoom: Option<f64>,
}

#[derive(Deserialize)]
struct RestrictionPayload {
    #[serde(default)]
    bounds: Option<LatLngBounds>,
}

#[derive(Deserialize)]
struct GesturePayload {
    mode: GestureHandling,
}

#[derive(Deserialize)]
struct FitBoundsPayload {
    bounds: LatLngBounds,
    #[serde(default)]
    padding: Option<f64>,
}

#[derive(Deserialize)]
struct PanByPayload {
    dx: f64,
    dy: f64,
}

#[derive(Deserialize)]
struct ZoomByPayload {
    delta: f64,
    #[serde(default)]
    focus: Option<ScreenPoint>,
}

// =============================================================================
// COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    /// Raw script supplied by the host.
    EvaluateJavaScript(String),
    AddMarker(MarkerSpec),
    RemoveMarker(String),
    ShowInfoWindow(String),
    HideInfoWindow(String),
    IsInfoWindowShown(String),
    AddPolyline(PolylineSpec),
    RemovePolyline(String),
    AddPolygon(PolygonSpec),
    RemovePolygon(String),
    AddCircle(CircleSpec),
    RemoveCircle(String),
    AddHeatmap(HeatmapSpec),
    RemoveHeatmap(String),
    AddGroundOverlay(GroundOverlaySpec),
    RemoveGroundOverlay(String),
    SetMapStyle(String),
    SetMapType(MapType),
    SetZoomControl(bool),
    SetMinMaxZoom {
        min_zoom: Option<f64>,
        max_zoom: Option<f64>,
    },
    SetTrafficEnabled(bool),
    /// `None` lifts the restriction.
    SetRestriction(Option<LatLngBounds>),
    SetGestureHandling(GestureHandling),
    MoveCamera(CameraUpdate),
    FitBounds {
        bounds: LatLngBounds,
        padding: Option<f64>,
    },
    PanBy {
        dx: f64,
        dy: f64,
    },
    ZoomBy {
        delta: f64,
        focus: Option<ScreenPoint>,
    },
    ZoomTo(f64),
    GetVisibleRegion,
    LatLngToScreenCoordinate(LatLng),
    ScreenCoordinateToLatLng(ScreenPoint),
    GetZoomLevel,
}

impl MapCommand {
    /// Decode and validate a `{method, payload}` call.
    ///
    /// Unknown methods yield [`BridgeError::NotImplemented`]; everything
    /// else that fails to decode or validate is [`BridgeError::InvalidArgs`].
    pub fn parse(method: &str, payload: &Value) -> Result<Self, BridgeError> {
        let command = match method {
            "evaluateJavaScript" => match payload {
                Value::String(script) => Self::EvaluateJavaScript(script.clone()),
                _ => return Err(invalid(method, "expected a script string")),
            },
            "addMarker" => Self::AddMarker(decode(method, payload)?),
            "removeMarker" => Self::RemoveMarker(id_field(method, payload, "markerId")?),
            "showInfoWindow" => Self::ShowInfoWindow(id_field(method, payload, "markerId")?),
            "hideInfoWindow" => Self::HideInfoWindow(id_field(method, payload, "markerId")?),
            "isInfoWindowShown" => {
                Self::IsInfoWindowShown(id_field(method, payload, "markerId")?)
            }
            "addPolyline" => Self::AddPolyline(decode(method, payload)?),
            "removePolyline" => Self::RemovePolyline(id_field(method, payload, "polylineId")?),
            "addPolygon" => Self::AddPolygon(decode(method, payload)?),
            "removePolygon" => Self::RemovePolygon(id_field(method, payload, "polygonId")?),
            "addCircle" => Self::AddCircle(decode(method, payload)?),
            "removeCircle" => Self::RemoveCircle(id_field(method, payload, "circleId")?),
            "addHeatmap" => Self::AddHeatmap(decode(method, payload)?),
            "removeHeatmap" => Self::RemoveHeatmap(id_field(method, payload, "heatmapId")?),
            "addGroundOverlay" => Self::AddGroundOverlay(decode(method, payload)?),
            "removeGroundOverlay" => {
                Self::RemoveGroundOverlay(id_field(method, payload, "groundOverlayId")?)
            }
            "setMapStyle" => Self::SetMapStyle(str_field(method, payload, "style")?),
            "setMapType" => {
                let name = str_field(method, payload, "mapType")?;
                let map_type = MapType::parse(&name)
                    .ok_or_else(|| invalid(method, &format!("unknown map type '{name}'")))?;
                Self::SetMapType(map_type)
            }
            "setZoomControl" => Self::SetZoomControl(bool_field(method, payload, "enabled")?),
            "setMinMaxZoom" => {
                let p: MinMaxZoomPayload = decode(method, payload)?;
                Self::SetMinMaxZoom {
                    min_zoom: p.min_zoom,
                    max_zoom: p.max_zoom,
                }
            }
            "setTrafficEnabled" => {
                Self::SetTrafficEnabled(bool_field(method, payload, "enabled")?)
            }
            "setRestriction" => {
                let p: RestrictionPayload = decode(method, payload)?;
                Self::SetRestriction(p.bounds)
            }
            "setGestureHandling" => {
                let p: GesturePayload = decode(method, payload)?;
                Self::SetGestureHandling(p.mode)
            }
            "moveCamera" => Self::MoveCamera(decode(method, payload)?),
            "fitBounds" => {
                let p: FitBoundsPayload = decode(method, payload)?;
                Self::FitBounds {
                    bounds: p.bounds,
                    padding: p.padding,
                }
            }
            "panBy" => {
                let p: PanByPayload = decode(method, payload)?;
                Self::PanBy { dx: p.dx, dy: p.dy }
            }
            "zoomBy" => {
                let p: ZoomByPayload = decode(method, payload)?;
                Self::ZoomBy {
                    delta: p.delta,
                    focus: p.focus,
                }
            }
            "zoomTo" => Self::ZoomTo(f64_field(method, payload, "zoom")?),
            "getVisibleRegion" => Self::GetVisibleRegion,
            "latLngToScreenCoordinate" => Self::LatLngToScreenCoordinate(decode(method, payload)?),
            "screenCoordinateToLatLng" => Self::ScreenCoordinateToLatLng(decode(method, payload)?),
            "getZoomLevel" => Self::GetZoomLevel,
            _ => return Err(BridgeError::NotImplemented(method.to_string())),
        };

        command.validate()?;
        Ok(command)
    }

    /// Channel method name of this command.
    pub fn method(&self) -> &'static str {
        match self {
            Self::EvaluateJavaScript(_) => "evaluateJavaScript",
            Self::AddMarker(_) => "addMarker",
            Self::RemoveMarker(_) => "removeMarker",
            Self::ShowInfoWindow(_) => "showInfoWindow",
            Self::HideInfoWindow(_) => "hideInfoWindow",
            Self::IsInfoWindowShown(_) => "isInfoWindowShown",
            Self::AddPolyline(_) => "addPolyline",
            Self::RemovePolyline(_) => "removePolyline",
            Self::AddPolygon(_) => "addPolygon",
            Self::RemovePolygon(_) => "removePolygon",
            Self::AddCircle(_) => "addCircle",
            Self::RemoveCircle(_) => "removeCircle",
            Self::AddHeatmap(_) => "addHeatmap",
            Self::RemoveHeatmap(_) => "removeHeatmap",
            Self::AddGroundOverlay(_) => "addGroundOverlay",
            Self::RemoveGroundOverlay(_) => "removeGroundOverlay",
            Self::SetMapStyle(_) => "setMapStyle",
            Self::SetMapType(_) => "setMapType",
            Self::SetZoomControl(_) => "setZoomControl",
            Self::SetMinMaxZoom { .. } => "setMinMaxZoom",
            Self::SetTrafficEnabled(_) => "setTrafficEnabled",
            Self::SetRestriction(_) => "setRestriction",
            Self::SetGestureHandling(_) => "setGestureHandling",
            Self::MoveCamera(_) => "moveCamera",
            Self::FitBounds { .. } => "fitBounds",
            Self::PanBy { .. } => "panBy",
            Self::ZoomBy { .. } => "zoomBy",
            Self::ZoomTo(_) => "zoomTo",
            Self::GetVisibleRegion => "getVisibleRegion",
            Self::LatLngToScreenCoordinate(_) => "latLngToScreenCoordinate",
            Self::ScreenCoordinateToLatLng(_) => "screenCoordinateToLatLng",
            Self::GetZoomLevel => "getZoomLevel",
        }
    }

    /// Render the page-side call expression for this command.
    pub fn to_script(&self) -> String {
        match self {
            Self::EvaluateJavaScript(script) => script.clone(),
            Self::AddMarker(m) => js_call(
                "addMarker",
                &[
                    Value::from(m.marker_id.as_str()),
                    Value::from(m.lat),
                    Value::from(m.lng),
                    to_value(&m.options),
                ],
            ),
            Self::RemoveMarker(id) => js_call("removeMarker", &[Value::from(id.as_str())]),
            Self::ShowInfoWindow(id) => js_call("showInfoWindow", &[Value::from(id.as_str())]),
            Self::HideInfoWindow(id) => js_call("hideInfoWindow", &[Value::from(id.as_str())]),
            Self::IsInfoWindowShown(id) => {
                js_call("isInfoWindowShown", &[Value::from(id.as_str())])
            }
            Self::AddPolyline(p) => js_call(
                "addPolyline",
                &[
                    Value::from(p.polyline_id.as_str()),
                    to_value(&p.points),
                    to_value(&p.options),
                ],
            ),
            Self::RemovePolyline(id) => js_call("removePolyline", &[Value::from(id.as_str())]),
            Self::AddPolygon(p) => js_call(
                "addPolygon",
                &[
                    Value::from(p.polygon_id.as_str()),
                    to_value(&p.paths),
                    to_value(&p.options),
                ],
            ),
            Self::RemovePolygon(id) => js_call("removePolygon", &[Value::from(id.as_str())]),
            Self::AddCircle(c) => js_call(
                "addCircle",
                &[
                    Value::from(c.circle_id.as_str()),
                    Value::from(c.center.lat),
                    Value::from(c.center.lng),
                    Value::from(c.radius),
                    to_value(&c.options),
                ],
            ),
            Self::RemoveCircle(id) => js_call("removeCircle", &[Value::from(id.as_str())]),
            Self::AddHeatmap(h) => js_call(
                "addHeatmap",
                &[
                    Value::from(h.heatmap_id.as_str()),
                    to_value(&h.data),
                    to_value(&h.options),
                ],
            ),
            Self::RemoveHeatmap(id) => js_call("removeHeatmap", &[Value::from(id.as_str())]),
            Self::AddGroundOverlay(g) => js_call(
                "addGroundOverlay",
                &[
                    Value::from(g.ground_overlay_id.as_str()),
                    Value::from(g.image_url.as_str()),
                    Value::from(g.bounds.northeast.lat),
                    Value::from(g.bounds.northeast.lng),
                    Value::from(g.bounds.southwest.lat),
                    Value::from(g.bounds.southwest.lng),
                    to_value(&g.options),
                ],
            ),
            Self::RemoveGroundOverlay(id) => {
                js_call("removeGroundOverlay", &[Value::from(id.as_str())])
            }
            Self::SetMapStyle(style) => js_call("setMapStyle", &[Value::from(style.as_str())]),
            Self::SetMapType(t) => js_call("setMapType", &[Value::from(t.as_str())]),
            Self::SetZoomControl(on) => js_call("setZoomControl", &[Value::from(*on)]),
            Self::SetMinMaxZoom { min_zoom, max_zoom } => js_call(
                "setMinMaxZoom",
                &[to_value(min_zoom), to_value(max_zoom)],
            ),
            Self::SetTrafficEnabled(on) => js_call("setTrafficEnabled", &[Value::from(*on)]),
            Self::SetRestriction(None) => {
                js_call("setRestriction", &[Value::Null, Value::Null, Value::Null, Value::Null])
            }
            Self::SetRestriction(Some(b)) => js_call("setRestriction", &bounds_args(b)),
            Self::SetGestureHandling(mode) => {
                js_call("setGestureHandling", &[Value::from(mode.as_str())])
            }
            Self::MoveCamera(update) => js_call(
                "moveCamera",
                &[
                    to_value(&update.target.map(|t| t.lat)),
                    to_value(&update.target.map(|t| t.lng)),
                    to_value(&update.zoom),
                    to_value(&update.heading),
                    to_value(&update.tilt),
                ],
            ),
            Self::FitBounds { bounds, padding } => {
                let mut args = bounds_args(bounds).to_vec();
                args.push(to_value(padding));
                js_call("fitBounds", &args)
            }
            Self::PanBy { dx, dy } => js_call("panBy", &[Value::from(*dx), Value::from(*dy)]),
            Self::ZoomBy { delta, focus } => js_call(
                "zoomBy",
                &[
                    Value::from(*delta),
                    to_value(&focus.map(|p| p.x)),
                    to_value(&focus.map(|p| p.y)),
                ],
            ),
            Self::ZoomTo(zoom) => js_call("zoomTo", &[Value::from(*zoom)]),
            Self::GetVisibleRegion => js_call("getVisibleRegion", &[]),
            Self::LatLngToScreenCoordinate(p) => js_call(
                "latLngToScreenCoordinate",
                &[Value::from(p.lat), Value::from(p.lng)],
            ),
            Self::ScreenCoordinateToLatLng(p) => js_call(
                "screenCoordinateToLatLng",
                &[Value::from(p.x), Value::from(p.y)],
            ),
            Self::GetZoomLevel => js_call("getZoomLevel", &[]),
        }
    }

    fn validate(&self) -> Result<(), BridgeError> {
        let method = self.method();
        match self {
            Self::AddMarker(m) => {
                require_id(method, &m.marker_id)?;
                require_position(method, &LatLng::new(m.lat, m.lng))?;
                if let Some(opacity) = m.options.opacity {
                    if !(0.0..=1.0).contains(&opacity) {
                        return Err(invalid(method, "opacity must be within [0, 1]"));
                    }
                }
            }
            Self::AddPolyline(p) => {
                require_id(method, &p.polyline_id)?;
                if p.points.len() < 2 {
                    return Err(invalid(method, "a polyline needs at least 2 points"));
                }
                p.points.iter().try_for_each(|pt| require_position(method, pt))?;
            }
            Self::AddPolygon(p) => {
                require_id(method, &p.polygon_id)?;
                if p.paths.is_empty() {
                    return Err(invalid(method, "a polygon needs at least one ring"));
                }
                for ring in &p.paths {
                    if ring.len() < 3 {
                        return Err(invalid(method, "each polygon ring needs at least 3 points"));
                    }
                    ring.iter().try_for_each(|pt| require_position(method, pt))?;
                }
            }
            Self::AddCircle(c) => {
                require_id(method, &c.circle_id)?;
                require_position(method, &c.center)?;
                if !c.radius.is_finite() || c.radius < 0.0 {
                    return Err(invalid(method, "radius must be a non-negative number"));
                }
            }
            Self::AddHeatmap(h) => {
                require_id(method, &h.heatmap_id)?;
                h.data
                    .iter()
                    .try_for_each(|p| require_position(method, &LatLng::new(p.lat, p.lng)))?;
            }
            Self::AddGroundOverlay(g) => {
                require_id(method, &g.ground_overlay_id)?;
                if g.image_url.trim().is_empty() {
                    return Err(invalid(method, "imageUrl must not be empty"));
                }
                require_bounds(method, &g.bounds)?;
            }
            Self::SetMinMaxZoom {
                min_zoom: Some(min),
                max_zoom: Some(max),
            } if min > max => {
                return Err(invalid(method, "minZoom must not exceed maxZoom"));
            }
            Self::SetRestriction(Some(bounds)) | Self::FitBounds { bounds, .. } => {
                require_bounds(method, bounds)?;
            }
            Self::MoveCamera(CameraUpdate {
                target: Some(target),
                ..
            }) => require_position(method, target)?,
            Self::ZoomTo(zoom) if !zoom.is_finite() || *zoom < 0.0 => {
                return Err(invalid(method, "zoom must be a non-negative number"));
            }
            Self::LatLngToScreenCoordinate(p) => require_position(method, p)?,
            _ => {}
        }
        Ok(())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn invalid(method: &str, reason: &str) -> BridgeError {
    BridgeError::InvalidArgs(format!("{method}: {reason}"))
}

fn decode<T: DeserializeOwned>(method: &str, payload: &Value) -> Result<T, BridgeError> {
    serde_json::from_value(payload.clone()).map_err(|e| invalid(method, &e.to_string()))
}

fn field<'a>(method: &str, payload: &'a Value, key: &str) -> Result<&'a Value, BridgeError> {
    payload
        .get(key)
        .ok_or_else(|| invalid(method, &format!("missing field '{key}'")))
}

fn str_field(method: &str, payload: &Value, key: &str) -> Result<String, BridgeError> {
    field(method, payload, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(method, &format!("'{key}' must be a string")))
}

fn id_field(method: &str, payload: &Value, key: &str) -> Result<String, BridgeError> {
    let id = str_field(method, payload, key)?;
    require_id(method, &id)?;
    Ok(id)
}

fn bool_field(method: &str, payload: &Value, key: &str) -> Result<bool, BridgeError> {
    field(method, payload, key)?
        .as_bool()
        .ok_or_else(|| invalid(method, &format!("'{key}' must be a boolean")))
}

fn f64_field(method: &str, payload: &Value, key: &str) -> Result<f64, BridgeError> {
    field(method, payload, key)?
        .as_f64()
        .ok_or_else(|| invalid(method, &format!("'{key}' must be a number")))
}

fn require_id(method: &str, id: &str) -> Result<(), BridgeError> {
    if id.trim().is_empty() {
        return Err(invalid(method, "id must not be empty"));
    }
    Ok(())
}

fn require_position(method: &str, p: &LatLng) -> Result<(), BridgeError> {
    if !p.is_valid() {
        return Err(invalid(
            method,
            &format!("position ({}, {}) is out of range", p.lat, p.lng),
        ));
    }
    Ok(())
}

fn require_bounds(method: &str, b: &LatLngBounds) -> Result<(), BridgeError> {
    require_position(method, &b.northeast)?;
    require_position(method, &b.southwest)
}

fn bounds_args(b: &LatLngBounds) -> [Value; 4] {
    [
        Value::from(b.northeast.lat),
        Value::from(b.northeast.lng),
        Value::from(b.southwest.lat),
        Value::from(b.southwest.lng),
    ]
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// `name(arg, ...);` with every argument encoded as a JSON literal.
fn js_call(name: &str, args: &[Value]) -> String {
    let args: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("{name}({});", args.join(", "))
}
