/// Default TOML config content with comments.
pub(super) fn default_config_toml() -> &'static str {
    r##"# mapview configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[map]
# api_key = ""            # falls back to $GOOGLE_MAPS_API_KEY
# lat = 0.0               # -90 to 90
# lng = 0.0               # -180 to 180
# zoom = 14.0             # 0-22
# style = "[]"            # JSON array of map styles
# map_type = "roadmap"    # roadmap, satellite, hybrid, terrain
# min_zoom = 3.0
# max_zoom = 20.0
# zoom_control = true
# traffic_enabled = false

[bridge]
# ready_events = ["mapReady", "ready"]
# pending_warn_threshold = 256

[webview]
# title = "mapview"
# width = 1024
# height = 768
# devtools = false
# transparent = false
# user_agent = "mapview/0.1"

[logging]
# level = "mapview=info"  # any tracing EnvFilter directive
"##
}
