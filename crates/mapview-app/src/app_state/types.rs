//! Internal constants for the app state module.

use std::time::Duration;

use mapview_common::ViewId;

/// How often to pump webview events (approx 60 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Capacity of the host event broadcast channel.
pub(super) const HOST_CHANNEL_CAPACITY: usize = 256;

/// The single map view hosted by the window.
pub(super) const PRIMARY_VIEW: ViewId = ViewId(0);
