//! Configuration validation.
//!
//! Each section has its own validator; errors from all of them are
//! collected into a single `ConfigError`. [`repair()`] is the lenient
//! counterpart that resets offending settings instead.

mod helpers;
mod repair;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::MapViewConfig;
use mapview_common::ConfigError;

pub use repair::{repair, repair_map_options};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MapViewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_map(&mut errors, config);
    sections::validate_bridge(&mut errors, config);
    sections::validate_webview(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
