use serde::{Deserialize, Serialize};
use std::fmt;

/// Short hex id used to follow one command through queue, flush and dispatch logs.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Identity of one embedded map view. Each view owns exactly one bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u32);

impl ViewId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Name of the per-view method channel, e.g. `mapview/map_3`.
    pub fn channel_name(self) -> String {
        format!("mapview/map_{}", self.0)
    }
}

impl From<u32> for ViewId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
