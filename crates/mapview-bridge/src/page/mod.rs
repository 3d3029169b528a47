//! HTML document hosting the map.
//!
//! The page is a static asset with a single placeholder that receives the
//! initial [`MapOptions`] as a JSON object literal. The map script itself is
//! only requested once the controller calls `loadGoogleMapsAPI()`.

mod sanitize;

pub use sanitize::{script_json, style_json};

use mapview_config::MapOptions;
use serde_json::{json, Value};

const PAGE_TEMPLATE: &str = include_str!("../../assets/map_page.html");
const OPTIONS_PLACEHOLDER: &str = "__MAPVIEW_OPTIONS__";

/// Name of the page function that injects the map script.
pub const LOADER_FUNCTION: &str = "loadGoogleMapsAPI";

/// Options object handed to the page script.
pub fn page_options(options: &MapOptions) -> Value {
    json!({
        "apiKey": options.api_key,
        "lat": options.lat,
        "lng": options.lng,
        "zoom": options.zoom,
        "style": style_json(&options.style),
        "mapType": options.map_type.as_str(),
        "minZoom": options.min_zoom,
        "maxZoom": options.max_zoom,
        "zoomControl": options.zoom_control,
        "trafficEnabled": options.traffic_enabled,
    })
}

/// Render the full page document for `options`.
pub fn render(options: &MapOptions) -> String {
    PAGE_TEMPLATE.replacen(
        OPTIONS_PLACEHOLDER,
        &script_json(&page_options(options)),
        1,
    )
}

/// Script that starts the map script load when the loader exists.
///
/// Evaluates to `true` if the loader was invoked.
pub fn loader_probe_script() -> String {
    format!(
        "(typeof {LOADER_FUNCTION} === 'function') ? ({LOADER_FUNCTION}(), true) : false"
    )
}
