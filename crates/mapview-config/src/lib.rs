//! mapview configuration.
//!
//! TOML-based configuration for the map page, the bridge, the host webview
//! and logging. Every section uses serde defaults so partial configs work.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mapview_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BridgeConfig, LoggingConfig, MapOptions, MapType, MapViewConfig, WebViewSettings,
    CONFIG_SCHEMA_VERSION,
};

use mapview_common::ConfigError;

/// Environment variable consulted when `[map] api_key` is empty.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Load config from the platform default path and fill the API key from the
/// environment when the file leaves it empty.
///
/// Settings that fail validation are reset to their defaults with a warning;
/// the rest of the file is kept.
pub fn load_config() -> Result<MapViewConfig, ConfigError> {
    toml_loader::load_default().map(finish)
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &std::path::Path) -> Result<MapViewConfig, ConfigError> {
    toml_loader::load_from_path(path).map(finish)
}

fn finish(mut config: MapViewConfig) -> MapViewConfig {
    apply_env_api_key(&mut config);
    for reset in validation::repair(&mut config) {
        tracing::warn!("config setting reset to default: {reset}");
    }
    config
}

fn apply_env_api_key(config: &mut MapViewConfig) {
    if !config.map.api_key.is_empty() {
        return;
    }
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            tracing::debug!("using API key from {API_KEY_ENV}");
            config.map.api_key = key.trim().to_string();
        }
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &MapViewConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
