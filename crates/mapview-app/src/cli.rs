use clap::Parser;

/// mapview: host a Google Maps page in a native webview.
#[derive(Parser, Debug)]
#[command(name = "mapview", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (e.g. `mapview=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Google Maps API key; overrides config and GOOGLE_MAPS_API_KEY.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Initial latitude.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Initial longitude.
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Initial zoom level.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Submit a few map commands before the page is ready.
    #[arg(long)]
    pub demo: bool,
}

impl Args {
    /// Host creation arguments built from the map flags, keyed the way the
    /// bridge expects them. `None` when no map flag was given.
    pub fn creation_args(&self) -> Option<serde_json::Value> {
        let mut args = serde_json::Map::new();
        if let Some(key) = &self.api_key {
            args.insert("apiKey".into(), key.as_str().into());
        }
        if let Some(lat) = self.lat {
            args.insert("lat".into(), lat.into());
        }
        if let Some(lng) = self.lng {
            args.insert("lng".into(), lng.into());
        }
        if let Some(zoom) = self.zoom {
            args.insert("zoom".into(), zoom.into());
        }
        (!args.is_empty()).then_some(serde_json::Value::Object(args))
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_map_flags() {
        let args = Args::parse_from([
            "mapview", "--lat", "-33.86", "--lng", "151.2", "--zoom", "12", "--demo",
        ]);
        assert_eq!(args.lat, Some(-33.86));
        assert!(args.demo);
        assert_eq!(
            args.creation_args(),
            Some(json!({ "lat": -33.86, "lng": 151.2, "zoom": 12.0 }))
        );
    }

    #[test]
    fn no_map_flags_means_no_creation_args() {
        let args = Args::parse_from(["mapview", "--log-level", "mapview=debug"]);
        assert_eq!(args.log_level.as_deref(), Some("mapview=debug"));
        assert!(args.creation_args().is_none());
    }

    #[test]
    fn api_key_flag() {
        let args = Args::parse_from(["mapview", "--api-key", "K"]);
        assert_eq!(args.creation_args(), Some(json!({ "apiKey": "K" })));
    }
}
