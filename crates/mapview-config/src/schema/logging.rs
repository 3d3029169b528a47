use serde::{Deserialize, Serialize};

/// Logging settings. `level` is an `EnvFilter` directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "mapview=info".into(),
        }
    }
}
