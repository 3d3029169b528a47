//! Configuration schema types for mapview.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod logging;
mod map;
mod webview;

pub use bridge::*;
pub use logging::*;
pub use map::*;
pub use webview::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for mapview.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MapViewConfig {
    pub map: MapOptions,
    pub bridge: BridgeConfig,
    pub webview: WebViewSettings,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: MapViewConfig = toml::from_str("").unwrap();
        assert_eq!(config.map.map_type, MapType::Roadmap);
        assert!(config.map.zoom_control);
        assert_eq!(config.bridge.pending_warn_threshold, 256);
        assert_eq!(config.logging.level, "mapview=info");
    }

    #[test]
    fn sections_parse_independently() {
        let toml_str = r#"
[map]
lat = 52.52
lng = 13.405
map_type = "hybrid"

[webview]
width = 800
"#;
        let config: MapViewConfig = toml::from_str(toml_str).unwrap();
        assert!((config.map.lat - 52.52).abs() < f64::EPSILON);
        assert_eq!(config.map.map_type, MapType::Hybrid);
        assert_eq!(config.webview.width, 800);
        // Defaults preserved
        assert_eq!(config.webview.height, 768);
        assert_eq!(config.bridge.ready_events.len(), 2);
    }
}
