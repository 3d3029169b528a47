//! Bridge channel settings.

use serde::{Deserialize, Serialize};

/// Behaviour of the command/event bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Event types that mark the embedded content as ready.
    pub ready_events: Vec<String>,
    /// Log a warning each time the pre-ready queue grows by this many
    /// commands. Commands are never dropped.
    pub pending_warn_threshold: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            ready_events: vec!["mapReady".into(), "ready".into()],
            pending_warn_threshold: 256,
        }
    }
}
